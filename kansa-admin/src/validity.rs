//! Validity rules for member drafts
//!
//! A draft may be submitted when it has a legal name and an email, and its
//! paper publications are either absent or complete. These are checked on
//! every render of the action list, never cached.

use serde_json::Value;
use shared::Record;
use shared::models::truthy;

use crate::error::AdminError;

const PAPER_PUBS_FIELDS: [&str; 3] = ["name", "address", "country"];

/// Absent paper publications are valid; present ones need all three fields
pub fn is_valid_paper_pubs(pp: Option<&Value>) -> bool {
    match pp {
        None => true,
        Some(v) if !truthy(v) => true,
        Some(Value::Object(map)) => PAPER_PUBS_FIELDS
            .iter()
            .all(|field| map.get(*field).is_some_and(truthy)),
        Some(_) => false,
    }
}

pub fn is_valid_member(record: &Record) -> bool {
    validate_member(record).is_ok()
}

/// Like [`is_valid_member`] for untyped input; anything but an object is invalid
pub fn is_valid_member_value(value: &Value) -> bool {
    match value {
        Value::Object(map) => is_valid_member(&Record::from(map.clone())),
        _ => false,
    }
}

/// First failing rule, for logs and diagnostics
pub fn validate_member(record: &Record) -> Result<(), AdminError> {
    if !record.get("legal_name").is_some_and(truthy) {
        return Err(AdminError::Validation("legal name is required".into()));
    }
    if !record.get("email").is_some_and(truthy) {
        return Err(AdminError::Validation("email is required".into()));
    }
    if !is_valid_paper_pubs(record.get("paper_pubs")) {
        return Err(AdminError::Validation(
            "paper publications need name, address and country".into(),
        ));
    }
    Ok(())
}
