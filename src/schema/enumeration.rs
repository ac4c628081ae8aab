//! Enum schema

use serde_json::Value;
use std::hash::{Hash, Hasher};

use super::builder::Draft;
use super::{hash_value, values_match, Metadata, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Expected, Result, ValidationFailure};
use crate::kind::SchemaKind;
use crate::validator::Validator;

/// Accepts one of a fixed, ordered list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumSchema {
    metadata: Metadata,
    values: Vec<Value>,
    default: Option<Value>,
}

impl EnumSchema {
    pub fn builder() -> SchemaBuilder<EnumSchema> {
        SchemaBuilder::new()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl SchemaBuilder<EnumSchema> {
    /// Append a permitted value
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.draft.values.push(value.into());
        self
    }

    pub fn values<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.draft.values.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.draft.default = Some(default.into());
        self
    }
}

impl Draft for EnumSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for EnumSchema {
    const KIND: SchemaKind = SchemaKind::Enum;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.clone()
    }

    fn validate_with(&self, subject: &Value, _validator: &Validator) -> Result<()> {
        if self.values.iter().any(|value| values_match(value, subject)) {
            return Ok(());
        }
        Err(ValidationFailure::new(
            Expected::OneOf(self.values.clone()),
            subject,
        ))
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer
            .key_array("enum", self.values.iter().cloned())
            .if_present("default", self.default.clone());
    }
}

impl Hash for EnumSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata.hash(state);
        self.values.len().hash(state);
        for value in &self.values {
            hash_value(value, state);
        }
        if let Some(default) = &self.default {
            hash_value(default, state);
        }
    }
}
