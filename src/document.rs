//! Canonical description documents
//!
//! Schemas describe themselves by writing key/value pairs into a
//! [`DocumentWriter`]. Keys keep their insertion order, so a described
//! schema always reads `title`, `description`, `$id`, then the variant's
//! own keywords starting with `type`.

use serde_json::{Map, Value};

use crate::schema::Schema;

/// Insertion-ordered key/value writer
#[derive(Debug, Default)]
pub struct DocumentWriter {
    document: Map<String, Value>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a key with a value. Writing an existing key replaces its value
    /// and keeps its original position.
    pub fn key_value(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.document.insert(key.to_string(), value.into());
        self
    }

    /// Write a key with an array of values
    pub fn key_array<I, T>(&mut self, key: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect::<Vec<_>>();
        self.key_value(key, Value::Array(items))
    }

    /// Write a key only when a value is present. Absent values are skipped,
    /// never written as null.
    pub fn if_present<T: Into<Value>>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.key_value(key, value);
        }
        self
    }

    /// Write the description of a child schema under a key
    pub fn key_schema(&mut self, key: &str, schema: &Schema) -> &mut Self {
        self.key_value(key, schema.to_document())
    }

    /// Write an object of named child schema descriptions, in iteration order
    pub fn key_schemas<'a, I>(&mut self, key: &str, schemas: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a Schema)>,
    {
        let nested = schemas
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema.to_document()))
            .collect::<Map<String, Value>>();
        self.key_value(key, Value::Object(nested))
    }

    /// Finish writing and return the document
    pub fn finish(self) -> Value {
        Value::Object(self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut writer = DocumentWriter::new();
        writer.key_value("type", "boolean").key_value("default", true);
        let text = serde_json::to_string(&writer.finish()).unwrap();
        assert_eq!(text, r#"{"type":"boolean","default":true}"#);
    }

    #[test]
    fn test_if_present_skips_absent() {
        let mut writer = DocumentWriter::new();
        writer
            .key_value("type", "string")
            .if_present("minLength", None::<u64>)
            .if_present("maxLength", Some(4u64));
        assert_eq!(writer.finish(), json!({"type": "string", "maxLength": 4}));
    }

    #[test]
    fn test_key_array() {
        let mut writer = DocumentWriter::new();
        writer.key_array("required", ["id", "name"]);
        assert_eq!(writer.finish(), json!({"required": ["id", "name"]}));
    }

    #[test]
    fn test_empty_writer() {
        let writer = DocumentWriter::new();
        assert_eq!(writer.finish(), json!({}));
    }
}
