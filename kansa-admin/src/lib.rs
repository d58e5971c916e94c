//! Kansa Admin - member editing core
//!
//! Everything the member dialog does apart from drawing itself:
//!
//! - [`validity`]: whether a draft record may be submitted
//! - [`reconciler`]: local draft against the server baseline, changed-field
//!   delta and the commit guard
//! - [`actions`]: which operator actions are offered, with labels and
//!   enabled state
//! - [`badge_flow`]: the confirm / print / mark-printed / save / close
//!   sequence as an explicit state machine
//! - [`editor`]: the editing session tying these to the membership API,
//!   the badge printer and the operator prompts
//!
//! # Example
//!
//! ```ignore
//! use kansa_admin::{EditorConfig, MemberEditor, RegistrationState};
//!
//! let mut editor = MemberEditor::new(api, printer, prompts, notifier,
//!     RegistrationState::new(false, Some("10.0.0.7#desk")), EditorConfig::default());
//! editor.receive(record).await?;
//! editor.set_field(&["email"], "new@example.org");
//! editor.apply().await?;
//! ```

pub mod actions;
pub mod badge_flow;
pub mod config;
pub mod editor;
pub mod error;
pub mod ports;
pub mod reconciler;
pub mod validity;

pub use actions::{Action, ActionContext, ActionKind, badge_action_label, derive_actions};
pub use badge_flow::{BadgeFlow, BadgeFlowState, BadgePlan, FlowContext};
pub use config::{EditorConfig, RegistrationState, SubmitRelease};
pub use editor::MemberEditor;
pub use error::{AdminError, AdminResult};
pub use ports::{LogNotifier, Notifier, Prompts};
pub use reconciler::{PendingCommit, Reconciler};
pub use validity::{is_valid_member, is_valid_member_value, is_valid_paper_pubs, validate_member};
