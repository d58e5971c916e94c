//! Route table
//!
//! ```text
//! /login/:email/:key[/:id]     key login, outside the app tree
//! /                            app tree, auth checked on entry
//!   login, profile             -> /
//!   hugo                       -> hugo/vote
//!   hugo/admin*                external hugo admin
//!   hugo/nominate/:id          requires auth
//!   hugo/vote[/:id]
//!   hugo/:id/nominate          -> hugo/nominate/:id
//!   hugo/:id/vote              -> hugo/vote/:id
//!   daypass/:type
//!   new[/:membership]
//!   pay[/:type]
//!   upgrade[/:id]              requires auth
//! ```

use serde::Serialize;

use crate::location::{Location, encode_segment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    KeyLogin {
        email: String,
        key: String,
        id: Option<String>,
    },
    Index,
    HugoAdmin,
    HugoNominate { id: String },
    HugoVote { id: Option<String> },
    Daypass { kind: String },
    NewMemberIndex,
    NewMember { membership: String },
    Payments,
    NewPayment { kind: String },
    Upgrade { id: Option<String> },
}

impl Route {
    /// Routes rendered under the auth-checked app root
    pub fn in_app_tree(&self) -> bool {
        !matches!(self, Route::KeyLogin { .. })
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::HugoNominate { .. } | Route::Upgrade { .. })
    }
}

/// What a path resolves to before any guard runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Route(Route),
    /// Declarative redirect to another in-app path
    Redirect(String),
}

/// Match a location against the route table; first match wins
pub fn resolve(location: &Location) -> Option<Resolution> {
    let segments: Vec<&str> = location.segments().iter().map(String::as_str).collect();
    let route = |r: Route| Some(Resolution::Route(r));
    let redirect = |to: String| Some(Resolution::Redirect(to));

    match segments.as_slice() {
        ["login", email, key] => route(Route::KeyLogin {
            email: email.to_string(),
            key: key.to_string(),
            id: None,
        }),
        ["login", email, key, id] => route(Route::KeyLogin {
            email: email.to_string(),
            key: key.to_string(),
            id: Some(id.to_string()),
        }),

        [] => route(Route::Index),
        ["login"] | ["profile"] => redirect("/".into()),

        ["hugo"] => redirect("/hugo/vote".into()),
        ["hugo", first, ..] if first.starts_with("admin") => route(Route::HugoAdmin),
        ["hugo", "nominate", id] => route(Route::HugoNominate { id: id.to_string() }),
        ["hugo", "vote"] => route(Route::HugoVote { id: None }),
        ["hugo", "vote", id] => route(Route::HugoVote {
            id: Some(id.to_string()),
        }),
        ["hugo", id, "nominate"] => redirect(format!("/hugo/nominate/{}", encode_segment(id))),
        ["hugo", id, "vote"] => redirect(format!("/hugo/vote/{}", encode_segment(id))),

        ["daypass", kind] => route(Route::Daypass {
            kind: kind.to_string(),
        }),
        ["new"] => route(Route::NewMemberIndex),
        ["new", membership] => route(Route::NewMember {
            membership: membership.to_string(),
        }),
        ["pay"] => route(Route::Payments),
        ["pay", kind] => route(Route::NewPayment {
            kind: kind.to_string(),
        }),
        ["upgrade"] => route(Route::Upgrade { id: None }),
        ["upgrade", id] => route(Route::Upgrade {
            id: Some(id.to_string()),
        }),

        _ => None,
    }
}
