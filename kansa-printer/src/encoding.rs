//! Windows-1252 encoding for badge text
//!
//! Badge printers run in the WPC1252 code page so accented Latin names
//! print correctly. Characters outside the code page print as `?`.

/// Encode a string as Windows-1252, replacing unmappable characters with `?`
pub fn encode_cp1252(s: &str) -> Vec<u8> {
    let (cow, _, had_errors) = encoding_rs::WINDOWS_1252.encode(s);
    if !had_errors {
        return cow.into_owned();
    }

    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if unmappable {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Truncate a string to at most `max_width` printed columns
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}
