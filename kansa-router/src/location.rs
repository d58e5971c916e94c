//! In-app locations
//!
//! A location is a path plus query, always relative to the app root. Path
//! segments are percent-decoded once at parse time so route parameters can
//! be used as-is.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use crate::error::{RouterError, RouterResult};

const APP_ORIGIN: &str = "http://app.invalid/";

/// Characters escaped when a parameter is put back into a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a route parameter for use as one path segment
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// How a navigation was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NavigationAction {
    #[default]
    Push,
    Replace,
    /// Browser back/forward
    Pop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse an absolute or root-relative in-app path, e.g. `/hugo/vote/3?x=1`
    pub fn parse(input: &str) -> RouterResult<Self> {
        let invalid = |reason: String| RouterError::InvalidLocation(format!("{}: {}", input, reason));

        let base = Url::parse(APP_ORIGIN).map_err(|e| invalid(e.to_string()))?;
        let url = base.join(input).map_err(|e| invalid(e.to_string()))?;
        if url.origin() != base.origin() {
            return Err(invalid("not an in-app path".into()));
        }

        let segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(|s| {
                percent_decode_str(s)
                    .decode_utf8()
                    .map(|decoded| decoded.into_owned())
                    .map_err(|e| invalid(e.to_string()))
            })
            .collect::<RouterResult<Vec<_>>>()?;

        Ok(Self {
            path: url.path().to_string(),
            segments,
            query: url.query_pairs().into_owned().collect(),
        })
    }

    pub fn root() -> Self {
        Self {
            path: "/".into(),
            segments: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Encoded path, without query
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded, non-empty path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// First value of a query parameter
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Keep `other`'s query when this location has none of its own
    pub fn with_query_from(mut self, other: &Location) -> Self {
        if self.query.is_empty() {
            self.query = other.query.clone();
        }
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}
