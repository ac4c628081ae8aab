//! Array schema

use serde_json::Value;
use std::hash::{Hash, Hasher};

use super::builder::Draft;
use super::{hash_value, Metadata, Schema, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Expected, Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts arrays, optionally bounded in size and with every item checked
/// against an item schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArraySchema {
    metadata: Metadata,
    items: Option<Box<Schema>>,
    min_items: Option<usize>,
    max_items: Option<usize>,
    default: Option<Vec<Value>>,
}

impl ArraySchema {
    pub fn builder() -> SchemaBuilder<ArraySchema> {
        SchemaBuilder::new()
    }

    pub fn items(&self) -> Option<&Schema> {
        self.items.as_deref()
    }

    pub fn min_items(&self) -> Option<usize> {
        self.min_items
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }
}

impl SchemaBuilder<ArraySchema> {
    pub fn items(mut self, items: impl Into<Schema>) -> Self {
        self.draft.items = Some(Box::new(items.into()));
        self
    }

    pub fn min_items(mut self, min_items: usize) -> Self {
        self.draft.min_items = Some(min_items);
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.draft.max_items = Some(max_items);
        self
    }

    pub fn default_value(mut self, default: Vec<Value>) -> Self {
        self.draft.default = Some(default);
        self
    }
}

impl Draft for ArraySchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for ArraySchema {
    const KIND: SchemaKind = SchemaKind::Array;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.clone().map(Value::Array)
    }

    fn validate_with(&self, subject: &Value, validator: &Validator) -> Result<()> {
        let Some(items) = subject.as_array() else {
            return Err(ValidationFailure::type_mismatch(JsonKind::Array, subject));
        };
        if let Some(min) = self.min_items {
            if items.len() < min {
                return Err(ValidationFailure::new(Expected::MinItems(min), subject));
            }
        }
        if let Some(max) = self.max_items {
            if items.len() > max {
                return Err(ValidationFailure::new(Expected::MaxItems(max), subject));
            }
        }

        let Some(item_schema) = &self.items else {
            return Ok(());
        };
        let mut failures = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if let Err(failure) = validator.validate(item_schema, item) {
                failures.push(failure.prefixed(&index.to_string()));
                if validator.is_fail_early() {
                    break;
                }
            }
        }
        ValidationFailure::aggregate(subject, failures)
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer
            .key_value("type", JsonKind::Array.as_str())
            .if_present("minItems", self.min_items)
            .if_present("maxItems", self.max_items);
        if let Some(items) = &self.items {
            writer.key_schema("items", items);
        }
        writer.if_present("default", self.default.clone());
    }
}

impl Hash for ArraySchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata.hash(state);
        self.items.hash(state);
        self.min_items.hash(state);
        self.max_items.hash(state);
        if let Some(default) = &self.default {
            default.len().hash(state);
            for value in default {
                hash_value(value, state);
            }
        }
    }
}
