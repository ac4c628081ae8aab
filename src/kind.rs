//! Type tags for subjects and schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// JSON Kinds
// =============================================================================

/// JSON type of a subject value, as named in a schema's `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Kind of a runtime value. Numbers always report `Number`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The `type` keyword value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Schema Kinds
// =============================================================================

/// Tag of a schema variant. The variant set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Boolean,
    String,
    Number,
    Null,
    Enum,
    Array,
    Object,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Boolean => "boolean",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Null => "null",
            SchemaKind::Enum => "enum",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_values() {
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
        assert_eq!(JsonKind::of(&json!(true)), JsonKind::Boolean);
        assert_eq!(JsonKind::of(&json!(3)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!(3.5)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!("x")), JsonKind::String);
        assert_eq!(JsonKind::of(&json!([1])), JsonKind::Array);
        assert_eq!(JsonKind::of(&json!({"a": 1})), JsonKind::Object);
    }

    #[test]
    fn test_type_keyword_names() {
        assert_eq!(JsonKind::Integer.as_str(), "integer");
        assert_eq!(JsonKind::Boolean.to_string(), "boolean");
        assert_eq!(SchemaKind::Enum.to_string(), "enum");
        assert_eq!(SchemaKind::Object.name(), "object");
    }
}
