//! Editing core error types

use kansa_client::ClientError;
use kansa_printer::PrintError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Draft fails the validity rules
    #[error("Invalid member: {0}")]
    Validation(String),

    #[error("No changes to save")]
    NothingToCommit,

    /// A commit is already in flight for this session
    #[error("Save already in progress")]
    AlreadySubmitting,

    #[error("Record has no id")]
    MissingId,

    #[error("No member record is open")]
    NotOpen,

    #[error("Registration is locked")]
    Locked,

    #[error("No badge printer configured")]
    PrinterNotConfigured,

    #[error("Action not available: {0}")]
    ActionUnavailable(String),

    /// Operator declined a repeat print or claim
    #[error("Confirmation declined")]
    ConfirmationDeclined,

    #[error("Transport error: {0}")]
    Transport(#[from] ClientError),

    #[error("Badge print failed: {0}")]
    Print(#[from] PrintError),
}

impl AdminError {
    /// Message for an operator alert
    pub fn operator_message(&self) -> String {
        match self {
            AdminError::Transport(e) => e.operator_message(),
            AdminError::Print(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
