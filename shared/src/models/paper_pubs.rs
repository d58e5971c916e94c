//! Paper publications sub-record
//!
//! Name, address and country travel together: a record either has all three
//! or no paper publications at all.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Postal details for paper publications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperPubs {
    pub name: String,
    pub address: String,
    pub country: String,
}

impl PaperPubs {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            country: country.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.address.is_empty() && !self.country.is_empty()
    }

    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "address": self.address,
            "country": self.country,
        })
    }
}

/// Blank paper publications entry, used when an operator adds them to a record
pub fn empty_paper_pubs() -> Value {
    PaperPubs::default().to_value()
}
