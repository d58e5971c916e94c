//! Kansa Router - route table and navigation guard for the registration client
//!
//! - [`location`]: in-app paths with decoded segments and query
//! - [`route`]: the route table, including deprecated path redirects
//! - [`session`]: the session and viewport ports the guard drives
//! - [`guard`]: auth checks, key login and redirect handling per navigation

pub mod error;
pub mod guard;
pub mod location;
pub mod route;
pub mod session;

pub use error::{RouterError, RouterResult};
pub use guard::{DEFAULT_HUGO_ADMIN_ROOT, GuardState, Navigation, Outcome, RouteGuard, RouterConfig};
pub use location::{Location, NavigationAction, encode_segment};
pub use route::{Resolution, Route, resolve};
pub use session::{ApiSession, SessionStore, Viewport};
