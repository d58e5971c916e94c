//! Session and viewport ports used by the guard

use std::sync::RwLock;

use async_trait::async_trait;
use kansa_client::{ClientResult, MembershipApi};
use tracing::{debug, info};

/// Authentication state the guard consults and drives
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Email of the signed-in user, if any
    fn user_email(&self) -> Option<String>;

    /// Resume a session from a stored credential; `true` when signed in
    async fn try_login(&self) -> bool;

    /// Sign in with an emailed key
    async fn key_login(&self, email: &str, key: &str) -> ClientResult<()>;
}

/// Scroll control for the rendered view
pub trait Viewport {
    fn scroll_to_top(&self);
}

/// Session backed by the membership API's cookie session
pub struct ApiSession<A> {
    api: A,
    email: RwLock<Option<String>>,
}

impl<A: MembershipApi> ApiSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            email: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn set_email(&self, email: Option<String>) {
        *self.email.write().unwrap_or_else(|e| e.into_inner()) = email;
    }
}

#[async_trait]
impl<A: MembershipApi> SessionStore for ApiSession<A> {
    fn user_email(&self) -> Option<String> {
        self.email.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn try_login(&self) -> bool {
        match self.api.current_user().await {
            Ok(user) => {
                info!(email = %user.email, "Session resumed");
                self.set_email(Some(user.email));
                true
            }
            Err(e) => {
                debug!(error = %e, "No stored session");
                self.set_email(None);
                false
            }
        }
    }

    async fn key_login(&self, email: &str, key: &str) -> ClientResult<()> {
        self.api.key_login(email, key).await?;
        info!(email, "Key login succeeded");
        self.set_email(Some(email.to_string()));
        Ok(())
    }
}
