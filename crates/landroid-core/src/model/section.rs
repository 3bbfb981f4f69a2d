// ── Nested view sections ──
//
// A section read from a current-generation nested object keeps that object
// as it arrived. Readers see the typed fields through `Deref`; serialization
// (and with it `to_attributes`, menus and `show`) emits the original object.
// Sections synthesized from legacy fields or defaults serialize their typed
// form.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct Section<T> {
    value: T,
    raw: Option<Map<String, Value>>,
}

impl<T> Section<T> {
    /// A section built from legacy fields or defaults.
    pub fn synthesized(value: T) -> Self {
        Self { value, raw: None }
    }

    /// A section read from a nested object, which is kept verbatim.
    pub fn verbatim(value: T, raw: Map<String, Value>) -> Self {
        Self {
            value,
            raw: Some(raw),
        }
    }

    /// The nested object this section was read from, if any.
    pub fn raw(&self) -> Option<&Map<String, Value>> {
        self.raw.as_ref()
    }

    pub fn is_verbatim(&self) -> bool {
        self.raw.is_some()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Serialize> Section<T> {
    /// The object this section serializes to.
    pub fn to_object(&self) -> Map<String, Value> {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        match serde_json::to_value(&self.value) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl<T> From<T> for Section<T> {
    fn from(value: T) -> Self {
        Self::synthesized(value)
    }
}

impl<T> Deref for Section<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// Editing the typed fields drops the verbatim copy; the section then
/// serializes its typed form.
impl<T> DerefMut for Section<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.raw = None;
        &mut self.value
    }
}

/// Sections are equal when they serialize to the same object.
impl<T: Serialize> PartialEq for Section<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_object() == other.to_object()
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            Some(raw) => raw.serialize(serializer),
            None => self.value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Section<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let value = serde_json::from_value(Value::Object(raw.clone()))
            .map_err(serde::de::Error::custom)?;
        Ok(Self::verbatim(value, raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Blades;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn verbatim_section_serializes_its_source() {
        let raw = object(json!({ "total_on": 5, "reset_at": "-", "current_on": "7" }));
        let section = Section::verbatim(
            Blades {
                total_on: 5,
                current_on: 7,
                ..Blades::default()
            },
            raw.clone(),
        );

        assert_eq!(section.total_on, 5);
        assert_eq!(section.current_on, 7);
        assert_eq!(serde_json::to_value(&section).unwrap(), Value::Object(raw));
    }

    #[test]
    fn editing_drops_the_verbatim_copy() {
        let mut section = Section::verbatim(Blades::default(), object(json!({ "total_on": "x" })));
        section.total_on = 9;

        assert!(!section.is_verbatim());
        assert_eq!(section.to_object()["total_on"], json!(9));
        assert_eq!(section.to_object()["reset_time"], json!(crate::model::EPOCH));
    }

    #[test]
    fn equality_follows_the_serialized_form() {
        let typed = Section::synthesized(Blades::default());
        let read_back = Section::verbatim(Blades::default(), typed.to_object());
        assert_eq!(typed, read_back);

        let other = Section::verbatim(Blades::default(), object(json!({ "total_on": 0 })));
        assert_ne!(typed, other);
    }
}
