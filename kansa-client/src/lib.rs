//! Kansa Client - HTTP client for the membership API
//!
//! Provides network-based calls to the membership API used by the admin
//! editing core and the registration router.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{MembershipApi, paths};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::client::{
    CurrentUser, InvoiceItem, InvoiceRequest, KeyLoginRequest, LogEntry, UpgradeRequest,
};
