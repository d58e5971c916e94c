//! Data models
//!
//! Member records and the types that describe their fields.

pub mod membership;
pub mod paper_pubs;
pub mod record;

pub use membership::{MEMBERSHIP_TYPES, Membership, UnknownMembership};
pub use paper_pubs::{PaperPubs, empty_paper_pubs};
pub use record::{DEFAULT_TEXT_FIELDS, MEMBER_FIELDS, Record, fields, merge_defaults, truthy};
