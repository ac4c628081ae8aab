//! Schema fingerprints
//!
//! A fingerprint is the SHA256 of a schema's compact canonical description,
//! rendered with every object's keys sorted. Schema equality ignores the key
//! order of object values, so equal schemas share a fingerprint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::schema::Schema;

/// SHA256 fingerprint of a canonical description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a schema
    pub fn of(schema: &Schema) -> Self {
        Self::from_document(&schema.to_document())
    }

    /// Fingerprint an already written description document
    pub fn from_document(document: &Value) -> Self {
        let hash = Sha256::digest(sorted_keys(document).to_string().as_bytes());
        Self(format!("{:x}", hash))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that a schema still matches this fingerprint
    pub fn verify(&self, schema: &Schema) -> bool {
        *self == Self::of(schema)
    }
}

// Description keywords keep their writer order in output; only the digest
// input is sorted.
fn sorted_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key.clone(), sorted_keys(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_keys).collect()),
        other => other.clone(),
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BooleanSchema, EnumSchema, ObjectSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn test_fingerprint_consistency() {
        let a: Schema = BooleanSchema::builder().default_value(true).build().into();
        let b: Schema = BooleanSchema::builder().default_value(true).build().into();
        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
        assert_eq!(Fingerprint::of(&a).as_str().len(), 64);
    }

    #[test]
    fn test_fingerprint_different_schemas() {
        let a: Schema = BooleanSchema::builder().build().into();
        let b: Schema = StringSchema::builder().build().into();
        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn test_fingerprint_verification() {
        let schema: Schema = BooleanSchema::builder().build().into();
        let fingerprint = Fingerprint::of(&schema);
        assert!(fingerprint.verify(&schema));
        let other: Schema = BooleanSchema::builder().default_value(false).build().into();
        assert!(!fingerprint.verify(&other));
    }

    #[test]
    fn test_fingerprint_ignores_enum_value_key_order() {
        let reordered: Value = serde_json::from_str(r#"{"y":2,"x":1}"#).unwrap();
        let a: Schema = EnumSchema::builder().value(json!({"x": 1, "y": 2})).build().into();
        let b: Schema = EnumSchema::builder().value(reordered).build().into();
        assert_eq!(a, b);
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn test_fingerprint_ignores_object_default_key_order() {
        let mut forward = Map::new();
        forward.insert("a".to_string(), json!({"p": 1, "q": [{"m": 0, "n": 1}]}));
        forward.insert("b".to_string(), json!(true));
        let mut backward = Map::new();
        backward.insert("b".to_string(), json!(true));
        backward.insert(
            "a".to_string(),
            serde_json::from_str(r#"{"q":[{"n":1,"m":0}],"p":1}"#).unwrap(),
        );

        let a: Schema = ObjectSchema::builder().default_value(forward).build().into();
        let b: Schema = ObjectSchema::builder().default_value(backward).build().into();
        assert_eq!(a, b);
        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn test_fingerprint_from_document_sorts_nested_keys() {
        let a = json!({"type": "object", "default": {"x": [1, {"k": 1, "j": 2}]}});
        let b: Value =
            serde_json::from_str(r#"{"default":{"x":[1,{"j":2,"k":1}]},"type":"object"}"#).unwrap();
        assert_eq!(Fingerprint::from_document(&a), Fingerprint::from_document(&b));
        let c = json!({"type": "object", "default": {"x": [{"k": 1, "j": 2}, 1]}});
        assert_ne!(Fingerprint::from_document(&a), Fingerprint::from_document(&c));
    }
}
