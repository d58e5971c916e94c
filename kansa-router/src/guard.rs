//! Navigation guard
//!
//! Resolves a navigation to a rendered route or an external location,
//! running the login side effects the route table attaches:
//!
//! - entering the app tree checks the session first, trying a stored
//!   credential when nobody is signed in, and continues whatever the outcome
//! - key login routes sign in and redirect to `next`, the vote page for the
//!   given id, or the root
//! - protected routes without a signed-in user are replaced by the root
//!
//! Redirects are followed in place up to `max_redirects` hops.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RouterError, RouterResult};
use crate::location::{Location, NavigationAction, encode_segment};
use crate::route::{Resolution, Route, resolve};
use crate::session::{SessionStore, Viewport};

pub const DEFAULT_HUGO_ADMIN_ROOT: &str = "/hugo-admin/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Where `hugo/admin*` leaves the app for
    pub hugo_admin_root: String,
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            hugo_admin_root: DEFAULT_HUGO_ADMIN_ROOT.to_string(),
            max_redirects: 8,
        }
    }
}

impl RouterConfig {
    pub fn with_hugo_admin_root(mut self, root: impl Into<String>) -> Self {
        self.hugo_admin_root = root.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render { location: Location, route: Route },
    /// Leave the app for this URL
    External(String),
}

/// Result of one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub outcome: Outcome,
    /// Redirects followed on the way, in order
    pub redirects: Vec<String>,
}

impl Navigation {
    /// Rendered location, if the navigation stayed in the app
    pub fn location(&self) -> Option<&Location> {
        match &self.outcome {
            Outcome::Render { location, .. } => Some(location),
            Outcome::External(_) => None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match &self.outcome {
            Outcome::Render { route, .. } => Some(route),
            Outcome::External(_) => None,
        }
    }
}

pub struct RouteGuard<S, V> {
    session: S,
    viewport: V,
    config: RouterConfig,
    state: GuardState,
    /// Whether the last completed navigation rendered inside the app tree
    in_app: bool,
    current: Option<Location>,
}

impl<S: SessionStore, V: Viewport> RouteGuard<S, V> {
    pub fn new(session: S, viewport: V, config: RouterConfig) -> Self {
        Self {
            session,
            viewport,
            config,
            state: GuardState::Unauthenticated,
            in_app: false,
            current: None,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Navigate to `target`, following redirects and running guards
    pub async fn navigate(
        &mut self,
        target: &str,
        action: NavigationAction,
    ) -> RouterResult<Navigation> {
        let mut location = Location::parse(target)?;
        let mut redirects = Vec::new();

        loop {
            let resolution =
                resolve(&location).ok_or_else(|| RouterError::NoMatch(location.to_string()))?;

            let next = match resolution {
                Resolution::Redirect(to) => Location::parse(&to)?.with_query_from(&location),
                Resolution::Route(Route::KeyLogin { email, key, id }) => {
                    self.in_app = false;
                    self.key_login(&email, &key, id.as_deref(), &location).await
                }
                Resolution::Route(route) => {
                    if !self.in_app {
                        self.check_auth().await;
                    }
                    self.in_app = true;

                    if route.requires_auth()
                        && self.session.user_email().is_none()
                        && !location.is_root()
                    {
                        debug!(path = %location, "Protected route without session");
                        Location::root()
                    } else if route == Route::HugoAdmin {
                        info!(to = %self.config.hugo_admin_root, "Leaving for hugo admin");
                        self.in_app = false;
                        self.current = None;
                        return Ok(Navigation {
                            outcome: Outcome::External(self.config.hugo_admin_root.clone()),
                            redirects,
                        });
                    } else {
                        if action != NavigationAction::Pop {
                            self.viewport.scroll_to_top();
                        }
                        debug!(path = %location, ?route, "Navigation complete");
                        self.current = Some(location.clone());
                        return Ok(Navigation {
                            outcome: Outcome::Render { location, route },
                            redirects,
                        });
                    }
                }
            };

            if redirects.len() >= self.config.max_redirects {
                return Err(RouterError::RedirectLoop {
                    location: next.to_string(),
                    hops: redirects.len(),
                });
            }
            debug!(from = %location, to = %next, "Redirect");
            redirects.push(next.to_string());
            location = next;
        }
    }

    /// Resume a stored session unless someone is already signed in
    async fn check_auth(&mut self) {
        if self.session.user_email().is_some() {
            self.state = GuardState::Authenticated;
            return;
        }
        self.state = GuardState::Authenticating;
        let signed_in = self.session.try_login().await && self.session.user_email().is_some();
        self.state = if signed_in {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        };
        debug!(state = ?self.state, "Auth check finished");
    }

    /// Sign in from a login link and pick where to go next
    async fn key_login(
        &mut self,
        email: &str,
        key: &str,
        id: Option<&str>,
        location: &Location,
    ) -> Location {
        self.state = GuardState::Authenticating;
        if let Err(e) = self.session.key_login(email, key).await {
            warn!(email, error = %e, "Key login failed");
            self.state = GuardState::Unauthenticated;
            return Location::root();
        }
        self.state = GuardState::Authenticated;

        let target = match (location.query("next").filter(|n| !n.is_empty()), id) {
            (Some(next), _) => next.to_string(),
            (None, Some(id)) => format!("/hugo/vote/{}", encode_segment(id)),
            (None, None) => "/".to_string(),
        };
        Location::parse(&target).unwrap_or_else(|e| {
            warn!(next = %target, error = %e, "Ignoring login redirect");
            Location::root()
        })
    }
}
