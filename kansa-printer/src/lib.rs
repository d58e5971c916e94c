//! # kansa-printer
//!
//! Badge printing for the registration desks.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Latin names
//! - Network printing (TCP port 9100)
//! - Badge layout from a member record
//!
//! When to print (confirmation, marking the badge printed, saving pending
//! edits) stays in the admin editing core.
//!
//! ## Example
//!
//! ```ignore
//! use kansa_printer::{BadgePrinter, NetworkBadgePrinter, PrinterTarget};
//!
//! let target = PrinterTarget::parse("10.0.0.7:9100#front-desk");
//! let printer = NetworkBadgePrinter::default();
//! printer.print_badge(&target.unit, target.name.as_deref(), &record).await?;
//! ```

mod badge;
mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use badge::{BadgeLayout, BadgePrinter, NetworkBadgePrinter, PrinterTarget, TARGET_SEPARATOR};
pub use encoding::{encode_cp1252, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
