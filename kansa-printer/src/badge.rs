//! Member badges
//!
//! Renders a member record as an ESC/POS badge and sends it to a printer unit.
//! Printers are configured per registration desk as `unit#name`: the unit is
//! the printer address, the name identifies the printer on that unit.

use shared::Record;
use tracing::{debug, info};

use crate::error::{PrintError, PrintResult};
use crate::escpos::EscPosBuilder;
use crate::encoding::truncate_width;
use crate::printer::{NetworkPrinter, Printer};

/// Separator between unit and printer name in a configured target
pub const TARGET_SEPARATOR: char = '#';

/// Configured badge printer, parsed from `unit#name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterTarget {
    pub unit: String,
    pub name: Option<String>,
}

impl PrinterTarget {
    /// Split a configured printer string on `#`
    ///
    /// Anything after a second separator is ignored.
    pub fn parse(configured: &str) -> Self {
        let mut parts = configured.split(TARGET_SEPARATOR);
        let unit = parts.next().unwrap_or_default().to_string();
        let name = parts.next().map(str::to_string);
        Self { unit, name }
    }
}

impl std::fmt::Display for PrinterTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}{}{}", self.unit, TARGET_SEPARATOR, name),
            None => f.write_str(&self.unit),
        }
    }
}

/// Badge print transport
#[allow(async_fn_in_trait)]
pub trait BadgePrinter {
    async fn print_badge(&self, unit: &str, name: Option<&str>, record: &Record)
    -> PrintResult<()>;
}

/// Text lines printed on a badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLayout {
    pub name: String,
    pub subtitle: Option<String>,
    pub footer: String,
    pub qr_data: Option<String>,
}

impl BadgeLayout {
    /// Badge name falls back to the display name; the footer shows the
    /// member number and membership type
    pub fn from_record(record: &Record) -> PrintResult<Self> {
        let name = match record.text("badge_name") {
            "" => record.display_name(),
            badge_name => badge_name,
        };
        if name.is_empty() {
            return Err(PrintError::EmptyBadge(format!(
                "record {:?} has no badge or legal name",
                record.id()
            )));
        }

        let subtitle = match record.text("badge_subtitle") {
            "" => None,
            s => Some(s.to_string()),
        };
        let membership = record
            .membership()
            .map(|m| m.to_string())
            .unwrap_or_default();
        let footer = match record.member_number() {
            Some(n) => format!("#{} {}", n, membership),
            None => membership,
        };

        Ok(Self {
            name: name.to_string(),
            subtitle,
            footer: footer.trim().to_string(),
            qr_data: record.id().map(|id| format!("kansa:{}", id)),
        })
    }

    pub fn render(&self, width: usize) -> Vec<u8> {
        // Double-size text takes two columns per character
        let name = truncate_width(&self.name, width / 2);

        let mut b = EscPosBuilder::new();
        b.center().double_size().bold().line(&name).bold_off().reset_size();
        if let Some(subtitle) = &self.subtitle {
            b.line(&truncate_width(subtitle, width));
        }
        b.newline();
        if !self.footer.is_empty() {
            b.line(&self.footer);
        }
        if let Some(qr) = &self.qr_data {
            b.qr_code(qr, 4);
        }
        b.cut_feed(3);
        b.build()
    }
}

/// Badge printer over raw TCP printer units
#[derive(Debug, Clone)]
pub struct NetworkBadgePrinter {
    width: usize,
}

impl NetworkBadgePrinter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Whether the unit accepts connections
    pub async fn is_reachable(&self, unit: &str) -> PrintResult<bool> {
        Ok(NetworkPrinter::from_unit(unit)?.is_online().await)
    }
}

impl Default for NetworkBadgePrinter {
    fn default() -> Self {
        Self::new(32)
    }
}

impl BadgePrinter for NetworkBadgePrinter {
    async fn print_badge(
        &self,
        unit: &str,
        name: Option<&str>,
        record: &Record,
    ) -> PrintResult<()> {
        let layout = BadgeLayout::from_record(record)?;
        debug!(unit, printer = ?name, badge = %layout.name, "Rendering badge");

        let printer = NetworkPrinter::from_unit(unit)?;
        printer.print(&layout.render(self.width)).await?;

        info!(unit, printer = ?name, id = ?record.id(), "Badge printed");
        Ok(())
    }
}
