//! Operator-facing collaborators
//!
//! Prompts block the operator until answered; nothing else in the editing
//! core runs while one is open.

/// Fire-and-forget status messages (snackbar, status line, log)
pub trait Notifier {
    fn show_message(&self, text: &str);
}

/// Yes/no confirmation and alert dialogs
pub trait Prompts {
    fn confirm(&self, text: &str) -> bool;
    fn alert(&self, text: &str);
}

/// Notifier that writes messages to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_message(&self, text: &str) {
        tracing::info!(target: "kansa_admin::message", "{}", text);
    }
}
