//! Editing session configuration

use std::str::FromStr;

use kansa_printer::PrinterTarget;
use serde::{Deserialize, Serialize};

/// When the commit guard is released after a failed save
///
/// A successful save always keeps the guard set until the session is
/// reseeded or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitRelease {
    /// Clear the guard as soon as a save fails, so Apply is usable again
    #[default]
    OnFailure,
    /// Keep the guard until the caller resets it or reseeds the session
    Manual,
}

impl FromStr for SubmitRelease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_failure" | "on-failure" | "auto" => Ok(SubmitRelease::OnFailure),
            "manual" => Ok(SubmitRelease::Manual),
            other => Err(format!("unknown submit release policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub submit_release: SubmitRelease,
}

impl EditorConfig {
    pub fn with_submit_release(mut self, release: SubmitRelease) -> Self {
        self.submit_release = release;
        self
    }
}

/// Registration desk state the editor reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    /// Locked desks may only edit and print; no log, upgrade or invoice
    pub locked: bool,
    pub printer: Option<PrinterTarget>,
}

impl RegistrationState {
    /// `printer` is the configured `unit#name` string; empty means none
    pub fn new(locked: bool, printer: Option<&str>) -> Self {
        Self {
            locked,
            printer: printer
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PrinterTarget::parse),
        }
    }

    pub fn printer_configured(&self) -> bool {
        self.printer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_release_parse() {
        assert_eq!("manual".parse::<SubmitRelease>(), Ok(SubmitRelease::Manual));
        assert_eq!("On-Failure".parse::<SubmitRelease>(), Ok(SubmitRelease::OnFailure));
        assert!("sometimes".parse::<SubmitRelease>().is_err());
    }

    #[test]
    fn test_registration_state_printer() {
        let state = RegistrationState::new(false, Some("10.0.0.7#desk"));
        assert!(state.printer_configured());
        assert_eq!(state.printer.unwrap().name.as_deref(), Some("desk"));

        assert!(!RegistrationState::new(true, Some("  ")).printer_configured());
        assert!(!RegistrationState::new(true, None).printer_configured());
    }
}
