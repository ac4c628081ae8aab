//! String schema

use serde_json::Value;

use super::builder::Draft;
use super::{Metadata, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Expected, Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts strings, optionally bounded in length.
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringSchema {
    metadata: Metadata,
    min_length: Option<usize>,
    max_length: Option<usize>,
    default: Option<String>,
}

impl StringSchema {
    pub fn builder() -> SchemaBuilder<StringSchema> {
        SchemaBuilder::new()
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl SchemaBuilder<StringSchema> {
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.draft.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.draft.max_length = Some(max_length);
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.draft.default = Some(default.into());
        self
    }
}

impl Draft for StringSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for StringSchema {
    const KIND: SchemaKind = SchemaKind::String;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.clone().map(Value::String)
    }

    fn validate_with(&self, subject: &Value, _validator: &Validator) -> Result<()> {
        let Some(text) = subject.as_str() else {
            return Err(ValidationFailure::type_mismatch(JsonKind::String, subject));
        };
        let length = text.chars().count();
        if let Some(min) = self.min_length {
            if length < min {
                return Err(ValidationFailure::new(Expected::MinLength(min), subject));
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return Err(ValidationFailure::new(Expected::MaxLength(max), subject));
            }
        }
        Ok(())
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer
            .key_value("type", JsonKind::String.as_str())
            .if_present("minLength", self.min_length)
            .if_present("maxLength", self.max_length)
            .if_present("default", self.default.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_check() {
        let schema = StringSchema::builder().build();
        assert!(schema.validate(&json!("")).is_ok());
        let failure = schema.validate(&json!(12)).unwrap_err();
        assert_eq!(failure.expected(), &Expected::Type(JsonKind::String));
    }

    #[test]
    fn test_length_counts_chars() {
        let schema = StringSchema::builder().min_length(2).max_length(3).build();
        assert!(schema.validate(&json!("éé")).is_ok());
        assert!(schema.validate(&json!("ééé")).is_ok());

        let short = schema.validate(&json!("é")).unwrap_err();
        assert_eq!(short.expected(), &Expected::MinLength(2));
        assert_eq!(short.message(), "expected minLength: 2, actual: 1");

        let long = schema.validate(&json!("abcd")).unwrap_err();
        assert_eq!(long.expected(), &Expected::MaxLength(3));
    }

    #[test]
    fn test_inconsistent_bounds_build() {
        let schema = StringSchema::builder().min_length(5).max_length(1).build();
        assert_eq!(schema.min_length(), Some(5));
        assert!(schema.validate(&json!("abc")).is_err());
    }

    #[test]
    fn test_describe() {
        let schema = StringSchema::builder()
            .max_length(8)
            .default_value("none")
            .build();
        assert_eq!(
            schema.to_document().to_string(),
            r#"{"type":"string","maxLength":8,"default":"none"}"#
        );
    }
}
