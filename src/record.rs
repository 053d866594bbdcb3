//! Flat survey record keyed by field name.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::value::{Field, Value};

/// Column holding an optional JSON object whose entries extend the record.
pub const AUX_PAYLOAD_FIELD: &str = "data_json";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatRecord {
    fields: BTreeMap<String, Option<Value>>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.fields.insert(name.into(), value);
    }

    pub fn field(&self, name: &str) -> Field<'_> {
        match self.fields.get(name) {
            None => Field::Missing,
            Some(None) => Field::Null,
            Some(Some(value)) => Field::Present(value),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).value()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merges the JSON object stored under [`AUX_PAYLOAD_FIELD`] into the
    /// record, overwriting base fields with the same name. A payload that is
    /// not a JSON object leaves the record untouched.
    pub fn merge_aux_payload(&mut self) {
        let payload = match self.get(AUX_PAYLOAD_FIELD) {
            Some(Value::Text(text)) if !text.is_empty() => text.clone(),
            _ => return,
        };
        let parsed: serde_json::Map<String, serde_json::Value> =
            match serde_json::from_str(&payload) {
                Ok(map) => map,
                Err(err) => {
                    debug!("Ignoring undecodable {AUX_PAYLOAD_FIELD} payload: {err}");
                    return;
                }
            };
        debug!("Merging {} field(s) from {AUX_PAYLOAD_FIELD}", parsed.len());
        for (name, value) in &parsed {
            self.fields.insert(name.clone(), Value::from_json(value));
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Value>)> for FlatRecord {
    fn from_iter<T: IntoIterator<Item = (K, Option<Value>)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_aux_payload_overrides_and_extends_fields() {
        let mut record: FlatRecord = [
            ("Kab", Some(Value::from("01"))),
            ("B6R1", Some(Value::Integer(1))),
            (
                AUX_PAYLOAD_FIELD,
                Some(Value::from(r#"{"B6R1": 5, "B7R2": null, "R110": "Budi"}"#)),
            ),
        ]
        .into_iter()
        .collect();

        record.merge_aux_payload();

        assert_eq!(record.get("B6R1"), Some(&Value::Integer(5)));
        assert_eq!(record.field("B7R2"), Field::Null);
        assert_eq!(record.get("R110"), Some(&Value::from("Budi")));
        assert_eq!(record.get("Kab"), Some(&Value::from("01")));
    }

    #[test]
    fn merge_aux_payload_swallows_corrupt_json() {
        let mut record: FlatRecord = [
            ("Kab", Some(Value::from("01"))),
            (AUX_PAYLOAD_FIELD, Some(Value::from("{not json"))),
        ]
        .into_iter()
        .collect();
        let before = record.clone();

        record.merge_aux_payload();

        assert_eq!(record, before);
    }

    #[test]
    fn merge_aux_payload_ignores_non_object_json() {
        let mut record: FlatRecord = [(AUX_PAYLOAD_FIELD, Some(Value::from("[1, 2]")))]
            .into_iter()
            .collect();
        record.merge_aux_payload();
        assert_eq!(record.len(), 1);
    }
}
