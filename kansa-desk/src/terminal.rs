//! Terminal implementations of the operator ports

use std::io::{self, BufRead, Write};

use kansa_admin::Prompts;
use kansa_router::Viewport;

/// Confirmations and alerts on stdin/stderr
///
/// With `assume_yes` every confirmation is accepted without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompts {
    pub assume_yes: bool,
}

impl Prompts for TerminalPrompts {
    fn confirm(&self, text: &str) -> bool {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", text);
        if self.assume_yes {
            let _ = writeln!(stderr, "[y/N] y");
            return true;
        }
        let _ = write!(stderr, "[y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn alert(&self, text: &str) {
        eprintln!("!! {}", text);
    }
}

/// Terminal output has no scroll position to reset
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn scroll_to_top(&self) {
        tracing::trace!("scroll to top");
    }
}
