//! Membership API calls
//!
//! The narrow surface the admin core and the router depend on. Every
//! [`HttpClient`] gets it for free.

use async_trait::async_trait;
use serde_json::Value;
use shared::Record;
use shared::client::{
    CurrentUser, InvoiceRequest, KeyLoginRequest, LogEntry, UpgradeRequest,
};

use crate::error::ClientResult;
use crate::http::HttpClient;

/// Request paths, relative to the API base URL
pub mod paths {
    pub fn person(id: i64) -> String {
        format!("people/{}", id)
    }

    pub fn person_log(id: i64) -> String {
        format!("people/{}/log", id)
    }

    pub fn person_print(id: i64) -> String {
        format!("people/{}/print", id)
    }

    pub fn person_upgrade(id: i64) -> String {
        format!("people/{}/upgrade", id)
    }

    pub const INVOICE: &str = "purchase/invoice";
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const USER: &str = "user";
}

/// Membership API
#[async_trait]
pub trait MembershipApi: Send + Sync {
    /// Full person record
    async fn get_person(&self, id: i64) -> ClientResult<Record>;

    /// Audit log for a person
    async fn get_log(&self, id: i64) -> ClientResult<Vec<LogEntry>>;

    /// Apply a partial update (changed fields only)
    async fn update_person(&self, id: i64, changes: &Record) -> ClientResult<Value>;

    /// Mark the badge printed or the day pass claimed
    async fn mark_printed(&self, id: i64) -> ClientResult<Value>;

    async fn upgrade(&self, id: i64, request: &UpgradeRequest) -> ClientResult<Value>;

    async fn create_invoice(&self, request: &InvoiceRequest) -> ClientResult<Value>;

    /// Log in with an emailed key
    async fn key_login(&self, email: &str, key: &str) -> ClientResult<Value>;

    /// Current session's user, if the stored credential is still valid
    async fn current_user(&self) -> ClientResult<CurrentUser>;

    async fn logout(&self) -> ClientResult<Value>;
}

#[async_trait]
impl<H: HttpClient> MembershipApi for H {
    async fn get_person(&self, id: i64) -> ClientResult<Record> {
        self.get(&paths::person(id)).await
    }

    async fn get_log(&self, id: i64) -> ClientResult<Vec<LogEntry>> {
        self.get(&paths::person_log(id)).await
    }

    async fn update_person(&self, id: i64, changes: &Record) -> ClientResult<Value> {
        tracing::debug!(id, fields = changes.len(), "Updating person");
        self.post(&paths::person(id), changes).await
    }

    async fn mark_printed(&self, id: i64) -> ClientResult<Value> {
        self.post_empty(&paths::person_print(id)).await
    }

    async fn upgrade(&self, id: i64, request: &UpgradeRequest) -> ClientResult<Value> {
        self.post(&paths::person_upgrade(id), request).await
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> ClientResult<Value> {
        self.post(paths::INVOICE, request).await
    }

    async fn key_login(&self, email: &str, key: &str) -> ClientResult<Value> {
        let request = KeyLoginRequest {
            email: email.to_string(),
            key: key.to_string(),
        };
        self.post(paths::LOGIN, &request).await
    }

    async fn current_user(&self) -> ClientResult<CurrentUser> {
        self.get(paths::USER).await
    }

    async fn logout(&self) -> ClientResult<Value> {
        self.post_empty(paths::LOGOUT).await
    }
}
