//! Shared types for the Kansa membership clients
//!
//! Record model, membership types and API payloads used by the admin
//! editing core, the HTTP client and the router.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;

pub use models::{
    DEFAULT_TEXT_FIELDS, MEMBER_FIELDS, MEMBERSHIP_TYPES, Membership, PaperPubs, Record,
    UnknownMembership, empty_paper_pubs, fields, merge_defaults,
};
