//! Boolean schema

use serde_json::Value;

use super::builder::Draft;
use super::{Metadata, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts `true` and `false`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BooleanSchema {
    metadata: Metadata,
    default: Option<bool>,
}

/// Boolean schemas without metadata or default are all the same schema
static UNCONSTRAINED: BooleanSchema = BooleanSchema {
    metadata: Metadata::empty(),
    default: None,
};

impl BooleanSchema {
    pub fn builder() -> SchemaBuilder<BooleanSchema> {
        SchemaBuilder::new()
    }

    /// Shared instance with no metadata and no default
    pub fn unconstrained() -> &'static BooleanSchema {
        &UNCONSTRAINED
    }

    pub fn default_bool(&self) -> Option<bool> {
        self.default
    }
}

impl SchemaBuilder<BooleanSchema> {
    pub fn default_value(mut self, default: bool) -> Self {
        self.draft.default = Some(default);
        self
    }
}

impl Draft for BooleanSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for BooleanSchema {
    const KIND: SchemaKind = SchemaKind::Boolean;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.map(Value::Bool)
    }

    fn validate_with(&self, subject: &Value, _validator: &Validator) -> Result<()> {
        if !subject.is_boolean() {
            return Err(ValidationFailure::type_mismatch(JsonKind::Boolean, subject));
        }
        Ok(())
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer
            .key_value("type", JsonKind::Boolean.as_str())
            .if_present("default", self.default);
    }
}
