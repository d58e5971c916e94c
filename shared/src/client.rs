//! Client-related types shared between the admin core, the HTTP client and
//! the router
//!
//! Request/response payloads for the membership API calls the clients issue.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Membership, PaperPubs};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Key login request (`POST login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyLoginRequest {
    pub email: String,
    pub key: String,
}

/// Current user (`GET user`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    #[serde(default)]
    pub people: Vec<Value>,
    #[serde(default)]
    pub roles: Map<String, Value>,
}

// =============================================================================
// People API DTOs
// =============================================================================

/// One entry of a person's audit log (`GET people/{id}/log`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Membership upgrade (`POST people/{id}/upgrade`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<Membership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_pubs: Option<PaperPubs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount in cents
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

/// Purchase invoice (`POST purchase/invoice`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub email: String,
    pub items: Vec<InvoiceItem>,
}
