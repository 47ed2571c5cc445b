//! Dot-style access over untyped JSON response payloads.
//!
//! # Design
//! `Payload` wraps an already-parsed `serde_json::Value`. Construction
//! normalizes the root: a bare array becomes `{"collection": [...]}` so
//! array-root and object-root documents read the same way at the call site.
//! `get` wraps whatever it finds — scalar, object or array — in another
//! `Payload`, so nested access chains uniformly. Absent fields are a hard
//! error, surfacing fixture and stub typos early during test authoring.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// Rewrap a bare-array root as `{"collection": [...]}`.
///
/// Root-only: nested arrays stay arrays.
pub(crate) fn normalize_root(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut root = Map::new();
            root.insert("collection".to_string(), Value::Array(items));
            Value::Object(root)
        }
        other => other,
    }
}

/// A normalized view over one JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    value: Value,
}

impl Payload {
    /// Wrap a parsed JSON value, normalizing a bare-array root.
    pub fn new(value: Value) -> Self {
        Self {
            value: normalize_root(value),
        }
    }

    /// Wrap a nested value without root normalization.
    fn wrap(value: Value) -> Self {
        Self { value }
    }

    /// Read a field by name.
    ///
    /// # Errors
    /// `FieldMissing` when the field does not exist or the view does not
    /// hold an object.
    pub fn get(&self, field: &str) -> Result<Payload> {
        self.value
            .get(field)
            .cloned()
            .map(Payload::wrap)
            .ok_or_else(|| ClientError::FieldMissing(field.to_string()))
    }

    /// Write a field by name, overwriting any existing value.
    ///
    /// Roots are objects after normalization; a scalar root ignores writes.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        if let Value::Object(map) = &mut self.value {
            map.insert(field.to_string(), value.into());
        }
    }

    /// The elements of an array-root document, in order.
    pub fn collection(&self) -> Result<Vec<Payload>> {
        match self.get("collection")?.value {
            Value::Array(items) => Ok(items.into_iter().map(Payload::wrap).collect()),
            _ => Err(ClientError::FieldMissing("collection".to_string())),
        }
    }

    /// Wrapped elements when this view holds an array.
    pub fn as_array(&self) -> Option<Vec<Payload>> {
        self.value
            .as_array()
            .map(|items| items.iter().cloned().map(Payload::wrap).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Deserialize the view into a concrete type.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone()).map_err(ClientError::MalformedPayload)
    }
}

impl PartialEq<Value> for Payload {
    fn eq(&self, other: &Value) -> bool {
        &self.value == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_roots_are_rewrapped_as_a_collection() {
        let payload = Payload::new(json!([{"name": "South End Market"}]));
        let collection = payload.collection().unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].get("name").unwrap().as_str(), Some("South End Market"));
    }

    #[test]
    fn object_roots_are_left_alone() {
        let payload = Payload::new(json!({"status": "ORDER_PLACED"}));
        assert_eq!(payload.get("status").unwrap().as_str(), Some("ORDER_PLACED"));
        assert!(matches!(
            payload.collection().unwrap_err(),
            ClientError::FieldMissing(_)
        ));
    }

    #[test]
    fn nested_access_chains_through_wrapped_views() {
        let payload = Payload::new(json!({
            "deliveryAddress": {"street": "725 Albany Street", "city": "Boston"}
        }));
        let street = payload.get("deliveryAddress").unwrap().get("street").unwrap();
        assert_eq!(street.as_str(), Some("725 Albany Street"));
    }

    #[test]
    fn nested_arrays_stay_arrays() {
        let payload = Payload::new(json!({"rates": [{"provider": "dropoff"}]}));
        let rates = payload.get("rates").unwrap().as_array().unwrap();
        assert_eq!(rates[0].get("provider").unwrap().as_str(), Some("dropoff"));
    }

    #[test]
    fn absent_fields_are_a_hard_error() {
        let payload = Payload::new(json!({"status": "ORDER_PLACED"}));
        let err = payload.get("statuss").unwrap_err();
        assert!(matches!(err, ClientError::FieldMissing(ref field) if field == "statuss"));
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut payload = Payload::new(json!({"orderExternalId": "ORD-1"}));
        payload.set("orderExternalId", "ORD-2");
        assert_eq!(payload.get("orderExternalId").unwrap().as_str(), Some("ORD-2"));
    }

    #[test]
    fn compares_structurally_against_plain_values() {
        let document = json!({"status": "ORDER_PLACED", "tips": 0});
        assert_eq!(Payload::new(document.clone()), document);
    }

    #[test]
    fn deserializes_into_concrete_types() {
        #[derive(serde::Deserialize)]
        struct Status {
            status: String,
        }
        let payload = Payload::new(json!({"status": "ORDER_PLACED"}));
        let status: Status = payload.to_typed().unwrap();
        assert_eq!(status.status, "ORDER_PLACED");
    }
}
