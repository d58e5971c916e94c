//! ESC/POS command builder
//!
//! Provides a fluent API for building badge print data.

use crate::encoding::encode_cp1252;

/// ESC t n: select character code table, 16 = WPC1252
const CODE_PAGE_WPC1252: u8 = 16;

/// ESC/POS command builder
///
/// Text is encoded as Windows-1252 as it is written. Line width is the
/// caller's concern; see [`crate::truncate_width`].
pub struct EscPosBuilder {
    buf: Vec<u8>,
}

impl EscPosBuilder {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(512);
        // Initialize printer (ESC @), then select the code page
        buf.extend_from_slice(&[0x1B, 0x40, 0x1B, 0x74, CODE_PAGE_WPC1252]);
        Self { buf }
    }

    // === Text Output ===

    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_cp1252(s));
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === QR Code ===

    /// Print a QR code
    ///
    /// Size: 1-16 (module size in dots)
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);
        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);
        // Function 169: Error correction level M
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let data_bytes = data.as_bytes();
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);
        self
    }

    // === Paper Control ===

    /// Full cut after feeding n lines (GS V 66 n)
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_init_and_code_page() {
        let data = EscPosBuilder::new().build();
        assert_eq!(data, vec![0x1B, 0x40, 0x1B, 0x74, 16]);
    }

    #[test]
    fn test_line_encodes_text() {
        let mut b = EscPosBuilder::default();
        b.center().line("Åsa");
        let data = b.build();
        assert!(data.ends_with(&[0x1B, 0x61, 0x01, 0xC5, b's', b'a', b'\n']));
    }

    #[test]
    fn test_qr_code_length_header() {
        let mut b = EscPosBuilder::default();
        b.qr_code("kansa:42", 6);
        let data = b.build();
        // store-data header: pL = len("kansa:42") + 3
        let store = [0x1D, 0x28, 0x6B, 11, 0x00, 0x31, 0x50, 0x30];
        assert!(data.windows(store.len()).any(|w| w == store));
    }
}
