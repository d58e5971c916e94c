//! Routing error types

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// No route matches the path
    #[error("No route for {0}")]
    NoMatch(String),

    /// Redirect chain longer than the configured hop limit
    #[error("Redirect loop at {location} after {hops} hops")]
    RedirectLoop { location: String, hops: usize },

    /// Not an in-app path, or not decodable
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

pub type RouterResult<T> = Result<T, RouterError>;
