// ── Host entity snapshot ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::error::CoreError;

/// Read-only state record the host pushes for the monitored mower.
///
/// Mirrors the host's state object: a primary state string plus a free-form
/// attribute bag. Unknown top-level keys (`last_changed`, `context`, ...) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: AttributeBag,
}

impl EntitySnapshot {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>, attributes: AttributeBag) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes,
        }
    }

    /// Parse a host state object.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The entity's domain (`vacuum` for `vacuum.mower`).
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or("", |(domain, _)| domain)
    }
}

/// Untyped attribute mapping carrying both backend generations.
///
/// Every accessor treats `null` exactly like a missing key, so callers only
/// ever distinguish "present" from "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(Map<String, Value>);

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw value for `key`, or `None` when missing or `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(lenient::as_i64)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(lenient::as_f64)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(lenient::as_bool)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(lenient::as_text)
    }

    pub fn int_list(&self, key: &str) -> Option<Vec<i64>> {
        self.get(key).and_then(lenient::as_i64_list)
    }

    /// A nested object-shaped field, as its own bag.
    ///
    /// Returns `None` for scalars and arrays: only an object can stand in for
    /// a current-generation section.
    pub fn section(&self, key: &str) -> Option<AttributeBag> {
        match self.get(key) {
            Some(Value::Object(map)) => Some(Self(map.clone())),
            _ => None,
        }
    }

    /// Entries whose key is not in `known`, preserved verbatim.
    pub fn extras(&self, known: &[&str]) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(k, _)| !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> AttributeBag {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn null_is_treated_as_missing() {
        let attrs = bag(json!({ "battery": null, "rssi": -60 }));
        assert!(!attrs.contains("battery"));
        assert!(attrs.section("battery").is_none());
        assert_eq!(attrs.int("rssi"), Some(-60));
    }

    #[test]
    fn sections_require_objects() {
        let attrs = bag(json!({ "zone": [1, 2, 3, 4], "battery": { "percent": 80 } }));
        assert!(attrs.section("zone").is_none());
        assert_eq!(attrs.section("battery").and_then(|b| b.int("percent")), Some(80));
    }

    #[test]
    fn extras_skip_known_keys() {
        let attrs = bag(json!({ "id": 1, "description": "x", "extra": true }));
        let extras = attrs.extras(&["id", "description"]);
        assert_eq!(extras.len(), 1);
        assert_eq!(extras.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn snapshot_deserializes_host_state_object() {
        let snapshot: EntitySnapshot = serde_json::from_value(json!({
            "entity_id": "vacuum.mower",
            "state": "docked",
            "attributes": { "rssi": -55 },
            "last_changed": "2024-05-01T10:00:00+00:00"
        }))
        .unwrap_or_default();
        assert_eq!(snapshot.domain(), "vacuum");
        assert_eq!(snapshot.state, "docked");
        assert_eq!(snapshot.attributes.int("rssi"), Some(-55));
    }

    #[test]
    fn from_json_reports_malformed_documents() {
        let snapshot = EntitySnapshot::from_json(r#"{"entity_id":"vacuum.m","state":"idle"}"#);
        assert!(matches!(snapshot, Ok(s) if s.state == "idle" && s.attributes.is_empty()));
        assert!(matches!(
            EntitySnapshot::from_json("[1, 2"),
            Err(CoreError::Snapshot(_))
        ));
    }
}
