//! Null schema

use serde_json::Value;

use super::builder::Draft;
use super::{Metadata, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts only `null`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NullSchema {
    metadata: Metadata,
}

impl NullSchema {
    pub fn builder() -> SchemaBuilder<NullSchema> {
        SchemaBuilder::new()
    }
}

impl Draft for NullSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for NullSchema {
    const KIND: SchemaKind = SchemaKind::Null;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        None
    }

    fn validate_with(&self, subject: &Value, _validator: &Validator) -> Result<()> {
        if !subject.is_null() {
            return Err(ValidationFailure::type_mismatch(JsonKind::Null, subject));
        }
        Ok(())
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer.key_value("type", JsonKind::Null.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_null_passes() {
        let schema = NullSchema::builder().build();
        assert!(schema.validate(&json!(null)).is_ok());
        let failure = schema.validate(&json!(false)).unwrap_err();
        assert_eq!(failure.to_string(), "#: expected type: null, found: boolean");
    }
}
