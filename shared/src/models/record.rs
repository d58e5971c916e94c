//! Member record
//!
//! A member record is a persistent keyed mapping from field names to JSON
//! values. Snapshots are cheap to clone and compare structurally, so a draft
//! can be diffed against the server baseline on every edit.

use im::OrdMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::membership::Membership;

/// Text fields that default to an empty string on a fresh draft
pub const DEFAULT_TEXT_FIELDS: &[&str] = &[
    "legal_name",
    "email",
    "badge_name",
    "badge_subtitle",
    "public_first_name",
    "public_last_name",
    "country",
    "state",
    "city",
];

/// Canonical editable fields, in form order
pub const MEMBER_FIELDS: &[&str] = &[
    "membership",
    "legal_name",
    "email",
    "badge_name",
    "badge_subtitle",
    "public_first_name",
    "public_last_name",
    "country",
    "state",
    "city",
    "paper_pubs",
];

/// Canonical editable field list used for form generation
pub fn fields() -> &'static [&'static str] {
    MEMBER_FIELDS
}

/// JavaScript-style truthiness of a JSON value
///
/// Empty strings, `null`, `false` and zero are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Member record snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(OrdMap<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value; `None` unless the value is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into()),
            _ => None,
        }
    }

    /// Convert back into a plain JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a value along a nested path (e.g. `["paper_pubs", "name"]`)
    pub fn get_in(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.get(*key)?;
        }
        Some(current)
    }

    /// Insert a top-level field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`Record::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Write a value along a nested path, creating intermediate objects
    pub fn set_in(&mut self, path: &[&str], value: Value) {
        match path {
            [] => {}
            [key] => {
                self.0.insert((*key).to_string(), value);
            }
            [key, rest @ ..] => {
                let mut child = self
                    .0
                    .get(*key)
                    .filter(|v| v.is_object())
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));
                set_in_value(&mut child, rest, value);
                self.0.insert((*key).to_string(), child);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// String value of a field, `""` when absent or not a string
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    // ========== Typed accessors ==========

    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    pub fn membership(&self) -> Option<Membership> {
        self.get("membership")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn member_number(&self) -> Option<i64> {
        self.get("member_number").and_then(Value::as_i64)
    }

    pub fn daypass(&self) -> bool {
        self.get("daypass").is_some_and(truthy)
    }

    /// Time the badge was printed or the day pass claimed
    pub fn badge_print_time(&self) -> Option<&str> {
        self.get("badge_print_time")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.get("last_modified").and_then(Value::as_str)
    }

    /// Name shown in operator messages: `preferred_name`, else `legal_name`
    pub fn display_name(&self) -> &str {
        match self.text("preferred_name") {
            "" => self.text("legal_name"),
            name => name,
        }
    }

    /// Heading for the member dialog
    pub fn title(&self) -> String {
        self.membership()
            .unwrap_or(Membership::NonMember)
            .title(self.member_number())
    }
}

fn set_in_value(target: &mut Value, path: &[&str], value: Value) {
    let Some((key, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let entry = map.entry((*key).to_string()).or_insert(Value::Null);
        set_in_value(entry, rest, value);
    }
}

/// Fill every default text field absent from `record` with `""`
///
/// Values already present in `record` always win, whatever its size.
pub fn merge_defaults(record: &Record) -> Record {
    let mut merged = record.0.clone();
    for field in DEFAULT_TEXT_FIELDS {
        if !merged.contains_key(*field) {
            merged.insert(field.to_string(), Value::String(String::new()));
        }
    }
    Record(merged)
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(map.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_merge_defaults_fills_missing_text_fields() {
        let merged = merge_defaults(&record(json!({"id": 7, "legal_name": "Ann"})));

        assert_eq!(merged.text("legal_name"), "Ann");
        assert_eq!(merged.id(), Some(7));
        for field in DEFAULT_TEXT_FIELDS {
            assert!(merged.contains_key(field), "missing {field}");
        }
        assert_eq!(merged.get("email"), Some(&json!("")));
        assert!(!merged.contains_key("paper_pubs"));
    }

    #[test]
    fn test_merge_defaults_keeps_values_of_small_record() {
        let small = record(json!({
            "id": 12,
            "membership": "Adult",
            "member_number": 345,
            "legal_name": "Alice Example",
            "preferred_name": "Ali",
            "email": "alice@example.org"
        }));
        assert!(small.len() < DEFAULT_TEXT_FIELDS.len());

        let merged = merge_defaults(&small);

        assert_eq!(merged.text("legal_name"), "Alice Example");
        assert_eq!(merged.text("email"), "alice@example.org");
        assert_eq!(merged.get("member_number"), Some(&json!(345)));
        assert_eq!(merged.text("city"), "");
        assert_eq!(merge_defaults(&merged), merged);
    }

    #[test]
    fn test_fields_list() {
        assert_eq!(fields().len(), 11);
        assert_eq!(fields()[0], "membership");
        assert_eq!(fields()[10], "paper_pubs");
    }

    #[test]
    fn test_set_in_creates_nested_object() {
        let mut r = Record::new();
        r.set_in(&["paper_pubs", "name"], json!("Ann"));
        r.set_in(&["paper_pubs", "country"], json!("FI"));

        assert_eq!(r.get("paper_pubs"), Some(&json!({"name": "Ann", "country": "FI"})));
        assert_eq!(r.get_in(&["paper_pubs", "name"]), Some(&json!("Ann")));
        assert_eq!(r.get_in(&["paper_pubs", "address"]), None);
    }

    #[test]
    fn test_set_in_replaces_null_parent() {
        let mut r = record(json!({"paper_pubs": null}));
        r.set_in(&["paper_pubs", "address"], json!("Street 1"));
        assert_eq!(r.get("paper_pubs"), Some(&json!({"address": "Street 1"})));
    }

    #[test]
    fn test_structural_equality() {
        let a = record(json!({"id": 1, "email": "a@x", "paper_pubs": {"name": "A"}}));
        let mut b = Record::new();
        b.insert("email", "a@x");
        b.set_in(&["paper_pubs", "name"], json!("A"));
        b.insert("id", 1);
        assert_eq!(a, b);

        b.insert("email", "b@x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_as_plain_object() {
        let r: Record = serde_json::from_str(r#"{"id":3,"daypass":true}"#).unwrap();
        assert_eq!(r.id(), Some(3));
        assert!(r.daypass());
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({"id": 3, "daypass": true}));
    }

    #[test]
    fn test_accessors() {
        let r = record(json!({
            "membership": "Adult",
            "member_number": 42,
            "badge_print_time": "",
            "legal_name": "Ann Example",
            "preferred_name": "Annie"
        }));
        assert_eq!(r.membership(), Some(Membership::Adult));
        assert_eq!(r.badge_print_time(), None);
        assert_eq!(r.display_name(), "Annie");
        assert_eq!(r.title(), "Member #42 (Adult)");
        assert_eq!(Record::new().title(), "Non-member");
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!({})));
    }
}
