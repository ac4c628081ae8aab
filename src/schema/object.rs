//! Object schema

use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

use super::builder::Draft;
use super::{hash_value, Metadata, Schema, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Expected, Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts objects with declared property schemas and required keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    metadata: Metadata,
    /// Declared properties in declaration order
    properties: Vec<(String, Schema)>,
    required: Vec<String>,
    additional_properties: bool,
    default: Option<Map<String, Value>>,
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self {
            metadata: Metadata::default(),
            properties: Vec::new(),
            required: Vec::new(),
            additional_properties: true,
            default: None,
        }
    }
}

impl ObjectSchema {
    pub fn builder() -> SchemaBuilder<ObjectSchema> {
        SchemaBuilder::new()
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.properties.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn permits_additional_properties(&self) -> bool {
        self.additional_properties
    }

    fn declares(&self, name: &str) -> bool {
        self.properties.iter().any(|(key, _)| key == name)
    }
}

impl SchemaBuilder<ObjectSchema> {
    /// Declare a property. Redeclaring a name replaces its schema in place.
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.draft.properties.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = schema,
            None => self.draft.properties.push((name, schema)),
        }
        self
    }

    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.draft.required.contains(&name) {
            self.draft.required.push(name);
        }
        self
    }

    pub fn additional_properties(mut self, permitted: bool) -> Self {
        self.draft.additional_properties = permitted;
        self
    }

    pub fn default_value(mut self, default: Map<String, Value>) -> Self {
        self.draft.default = Some(default);
        self
    }
}

impl Draft for ObjectSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for ObjectSchema {
    const KIND: SchemaKind = SchemaKind::Object;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.clone().map(Value::Object)
    }

    fn validate_with(&self, subject: &Value, validator: &Validator) -> Result<()> {
        let Some(object) = subject.as_object() else {
            return Err(ValidationFailure::type_mismatch(JsonKind::Object, subject));
        };

        let fail_early = validator.is_fail_early();
        let mut failures = Vec::new();

        for name in &self.required {
            if !object.contains_key(name) {
                failures.push(ValidationFailure::new(
                    Expected::RequiredProperty(name.clone()),
                    subject,
                ));
                if fail_early {
                    return ValidationFailure::aggregate(subject, failures);
                }
            }
        }

        for (name, schema) in &self.properties {
            let Some(value) = object.get(name) else {
                continue;
            };
            if let Err(failure) = validator.validate(schema, value) {
                failures.push(failure.prefixed(name));
                if fail_early {
                    return ValidationFailure::aggregate(subject, failures);
                }
            }
        }

        if !self.additional_properties {
            for key in object.keys() {
                if self.declares(key) {
                    continue;
                }
                failures.push(ValidationFailure::new(
                    Expected::NoAdditionalProperty(key.clone()),
                    subject,
                ));
                if fail_early {
                    return ValidationFailure::aggregate(subject, failures);
                }
            }
        }

        ValidationFailure::aggregate(subject, failures)
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        writer.key_value("type", JsonKind::Object.as_str());
        if !self.properties.is_empty() {
            writer.key_schemas("properties", self.properties());
        }
        if !self.required.is_empty() {
            writer.key_array("required", self.required.iter().map(String::as_str));
        }
        if !self.additional_properties {
            writer.key_value("additionalProperties", false);
        }
        writer.if_present("default", self.default.clone());
    }
}

impl Hash for ObjectSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata.hash(state);
        self.properties.hash(state);
        self.required.hash(state);
        self.additional_properties.hash(state);
        if let Some(default) = &self.default {
            hash_value(&Value::Object(default.clone()), state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BooleanSchema, NumberSchema, StringSchema};
    use serde_json::json;

    fn account() -> ObjectSchema {
        ObjectSchema::builder()
            .property("name", StringSchema::builder().min_length(1).build())
            .property("age", NumberSchema::builder().requires_integer(true).build())
            .property("active", BooleanSchema::builder().build())
            .required_property("name")
            .required_property("active")
            .additional_properties(false)
            .build()
    }

    #[test]
    fn test_valid_object() {
        let subject = json!({"name": "ada", "age": 36, "active": true});
        assert!(account().validate(&subject).is_ok());
    }

    #[test]
    fn test_missing_required() {
        let failure = account().validate(&json!({"name": "ada"})).unwrap_err();
        assert_eq!(failure.expected(), &Expected::RequiredProperty("active".into()));
        assert_eq!(failure.pointer(), "#");
        assert_eq!(failure.message(), "required key [active] not found");
    }

    #[test]
    fn test_collects_every_violation() {
        let subject = json!({"name": "", "age": 1.5, "active": "yes", "extra": 1});
        let failure = account().validate(&subject).unwrap_err();
        assert_eq!(failure.violation_count(), 4);
        let pointers: Vec<_> = failure.causes().iter().map(|c| c.pointer()).collect();
        assert_eq!(pointers, vec!["#/name", "#/age", "#/active", "#"]);
        assert_eq!(
            failure.causes()[3].expected(),
            &Expected::NoAdditionalProperty("extra".into())
        );
    }

    #[test]
    fn test_fail_early() {
        let subject = json!({"name": "", "age": 1.5, "active": "yes"});
        let validator = Validator::new().fail_early(true);
        let failure = account().validate_with(&subject, &validator).unwrap_err();
        assert_eq!(failure.pointer(), "#/name");
        assert_eq!(failure.violation_count(), 1);
    }

    #[test]
    fn test_nested_pointers() {
        let schema = ObjectSchema::builder()
            .property("owner", account())
            .build();
        let failure = schema
            .validate(&json!({"owner": {"name": "x", "active": 1}}))
            .unwrap_err();
        assert_eq!(failure.pointer(), "#/owner/active");
    }

    #[test]
    fn test_redeclared_property_keeps_position() {
        let schema = ObjectSchema::builder()
            .property("a", NumberSchema::builder().build())
            .property("b", NumberSchema::builder().build())
            .property("a", StringSchema::builder().build())
            .build();
        let names: Vec<_> = schema.properties().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.property("a").map(Schema::kind), Some(SchemaKind::String));
    }

    #[test]
    fn test_describe() {
        let schema = ObjectSchema::builder()
            .title("Toggle")
            .property("on", BooleanSchema::builder().default_value(false).build())
            .required_property("on")
            .additional_properties(false)
            .build();
        assert_eq!(
            schema.to_document().to_string(),
            r#"{"title":"Toggle","type":"object","properties":{"on":{"type":"boolean","default":false}},"required":["on"],"additionalProperties":false}"#
        );
    }

    #[test]
    fn test_non_object_subject() {
        assert!(account().validate(&json!([])).unwrap_err().is_type_mismatch());
        assert!(ObjectSchema::builder().build().permits_additional_properties());
    }
}
