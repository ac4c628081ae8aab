//! Schema variants
//!
//! [`Schema`] is a closed sum of the concrete variant types. Equality and
//! hashing are structural: the enum compares variant tags first, so two
//! schemas of different kinds are never equal even when their metadata
//! coincides.

mod array;
mod boolean;
mod builder;
mod enumeration;
mod null;
mod number;
mod object;
mod string;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use builder::SchemaBuilder;
pub use enumeration::EnumSchema;
pub use null::NullSchema;
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::document::DocumentWriter;
use crate::error::Result;
use crate::kind::SchemaKind;
use crate::validator::Validator;

// =============================================================================
// Shared Metadata
// =============================================================================

/// Metadata carried by every schema variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Metadata {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

impl Metadata {
    pub const fn empty() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
        }
    }

    /// Schema identifier (`$id`)
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn describe_to(&self, writer: &mut DocumentWriter) {
        writer
            .if_present("title", self.title.as_deref())
            .if_present("description", self.description.as_deref())
            .if_present("$id", self.id.as_deref());
    }
}

// =============================================================================
// Variant Contract
// =============================================================================

/// Behaviour shared by every concrete schema variant
pub trait Variant {
    /// Tag of this variant
    const KIND: SchemaKind;

    fn metadata(&self) -> &Metadata;

    /// The configured default, if any. Defaults are descriptive only and are
    /// never checked against the schema.
    fn default_value(&self) -> Option<Value>;

    /// Check `subject` against this schema's own constraints. Child schemas
    /// are validated through `validator`.
    fn validate_with(&self, subject: &Value, validator: &Validator) -> Result<()>;

    /// Write the variant's own keywords, starting with its type keyword
    fn describe_properties(&self, writer: &mut DocumentWriter);

    fn validate(&self, subject: &Value) -> Result<()> {
        self.validate_with(subject, &Validator::default())
    }

    /// Write metadata followed by the variant's keywords
    fn describe(&self, writer: &mut DocumentWriter) {
        self.metadata().describe_to(writer);
        self.describe_properties(writer);
    }

    fn to_document(&self) -> Value {
        let mut writer = DocumentWriter::new();
        self.describe(&mut writer);
        writer.finish()
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Any schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    Boolean(BooleanSchema),
    String(StringSchema),
    Number(NumberSchema),
    Null(NullSchema),
    Enum(EnumSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
}

macro_rules! dispatch {
    ($schema:expr, $variant:ident => $body:expr) => {
        match $schema {
            Schema::Boolean($variant) => $body,
            Schema::String($variant) => $body,
            Schema::Number($variant) => $body,
            Schema::Null($variant) => $body,
            Schema::Enum($variant) => $body,
            Schema::Array($variant) => $body,
            Schema::Object($variant) => $body,
        }
    };
}

impl Schema {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::Boolean(_) => BooleanSchema::KIND,
            Schema::String(_) => StringSchema::KIND,
            Schema::Number(_) => NumberSchema::KIND,
            Schema::Null(_) => NullSchema::KIND,
            Schema::Enum(_) => EnumSchema::KIND,
            Schema::Array(_) => ArraySchema::KIND,
            Schema::Object(_) => ObjectSchema::KIND,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        dispatch!(self, s => s.metadata())
    }

    pub fn id(&self) -> Option<&str> {
        self.metadata().id()
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata().title()
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata().description()
    }

    pub fn default_value(&self) -> Option<Value> {
        dispatch!(self, s => s.default_value())
    }

    /// Validate a subject with the default validator
    pub fn validate(&self, subject: &Value) -> Result<()> {
        Validator::default().validate(self, subject)
    }

    pub(crate) fn validate_with(&self, subject: &Value, validator: &Validator) -> Result<()> {
        dispatch!(self, s => s.validate_with(subject, validator))
    }

    pub fn describe(&self, writer: &mut DocumentWriter) {
        dispatch!(self, s => s.describe(writer))
    }

    pub fn to_document(&self) -> Value {
        dispatch!(self, s => s.to_document())
    }
}

// Conversion into the enum, a checked downcast out of it, and equality
// between the enum and a concrete variant that goes through the downcast.
macro_rules! impl_variant_conversions {
    ($variant_type:ty, $variant:ident, $as_variant:ident) => {
        impl From<$variant_type> for Schema {
            fn from(schema: $variant_type) -> Self {
                Schema::$variant(schema)
            }
        }

        impl Schema {
            pub fn $as_variant(&self) -> Option<&$variant_type> {
                match self {
                    Schema::$variant(s) => Some(s),
                    _ => None,
                }
            }
        }

        impl PartialEq<$variant_type> for Schema {
            fn eq(&self, other: &$variant_type) -> bool {
                self.$as_variant() == Some(other)
            }
        }

        impl PartialEq<Schema> for $variant_type {
            fn eq(&self, other: &Schema) -> bool {
                other == self
            }
        }
    };
}

impl_variant_conversions!(BooleanSchema, Boolean, as_boolean);
impl_variant_conversions!(StringSchema, String, as_string);
impl_variant_conversions!(NumberSchema, Number, as_number);
impl_variant_conversions!(NullSchema, Null, as_null);
impl_variant_conversions!(EnumSchema, Enum, as_enum);
impl_variant_conversions!(ArraySchema, Array, as_array);
impl_variant_conversions!(ObjectSchema, Object, as_object);

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

// =============================================================================
// Value helpers
// =============================================================================

/// Hash a JSON value consistently with `Value`'s equality. Object keys are
/// hashed in sorted order since map equality ignores insertion order.
pub(crate) fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.hash(state);
            } else if let Some(i) = n.as_i64() {
                i.hash(state);
            } else if let Some(f) = n.as_f64() {
                hash_f64(f, state);
            }
        }
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            map.len().hash(state);
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                key.hash(state);
                hash_value(&map[key.as_str()], state);
            }
        }
    }
}

/// Hash a float so that `0.0` and `-0.0` collide
pub(crate) fn hash_f64<H: Hasher>(f: f64, state: &mut H) {
    let f = if f == 0.0 { 0.0 } else { f };
    f.to_bits().hash(state);
}

/// Value equality where numbers compare by magnitude (`1` matches `1.0`)
pub(crate) fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_match(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).map_or(false, |y| values_match(x, y)))
        }
        _ => a == b,
    }
}

/// JSON value for a float bound, written as an integer when it is one
pub(crate) fn number_value(f: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
    if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        Value::from(f as i64)
    } else {
        Value::from(f)
    }
}
