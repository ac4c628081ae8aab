//! Number schema

use serde_json::Value;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::builder::Draft;
use super::{hash_f64, number_value, Metadata, SchemaBuilder, Variant};
use crate::document::DocumentWriter;
use crate::error::{Expected, Result, ValidationFailure};
use crate::kind::{JsonKind, SchemaKind};
use crate::validator::Validator;

/// Accepts numbers, optionally integral and bounded
///
/// Bounds are not checked when the schema is built. A NaN bound compares
/// with nothing, so it never rejects a subject, and it describes as `null`
/// like any other non-finite bound.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    metadata: Metadata,
    requires_integer: bool,
    minimum: Option<f64>,
    exclusive_minimum: Option<f64>,
    maximum: Option<f64>,
    exclusive_maximum: Option<f64>,
    default: Option<f64>,
}

impl NumberSchema {
    pub fn builder() -> SchemaBuilder<NumberSchema> {
        SchemaBuilder::new()
    }

    pub fn requires_integer(&self) -> bool {
        self.requires_integer
    }

    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    fn bounds(&self) -> [Option<f64>; 5] {
        [
            self.minimum,
            self.exclusive_minimum,
            self.maximum,
            self.exclusive_maximum,
            self.default,
        ]
    }
}

impl SchemaBuilder<NumberSchema> {
    /// Only accept numbers without a fractional part
    pub fn requires_integer(mut self, requires_integer: bool) -> Self {
        self.draft.requires_integer = requires_integer;
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.draft.minimum = Some(minimum);
        self
    }

    pub fn exclusive_minimum(mut self, limit: f64) -> Self {
        self.draft.exclusive_minimum = Some(limit);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.draft.maximum = Some(maximum);
        self
    }

    pub fn exclusive_maximum(mut self, limit: f64) -> Self {
        self.draft.exclusive_maximum = Some(limit);
        self
    }

    pub fn default_value(mut self, default: f64) -> Self {
        self.draft.default = Some(default);
        self
    }
}

impl Draft for NumberSchema {
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl Variant for NumberSchema {
    const KIND: SchemaKind = SchemaKind::Number;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn default_value(&self) -> Option<Value> {
        self.default.map(number_value)
    }

    fn validate_with(&self, subject: &Value, _validator: &Validator) -> Result<()> {
        let expected_kind = if self.requires_integer {
            JsonKind::Integer
        } else {
            JsonKind::Number
        };
        let Some(number) = subject.as_f64() else {
            return Err(ValidationFailure::type_mismatch(expected_kind, subject));
        };
        if self.requires_integer && !(subject.is_i64() || subject.is_u64() || number.fract() == 0.0) {
            return Err(ValidationFailure::type_mismatch(expected_kind, subject));
        }

        let below = |bound: Option<f64>, inclusive: bool| {
            bound.map_or(false, |b| match compare(subject, number, b) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => !inclusive,
                _ => false,
            })
        };
        let above = |bound: Option<f64>, inclusive: bool| {
            bound.map_or(false, |b| match compare(subject, number, b) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => !inclusive,
                _ => false,
            })
        };

        let violated = if below(self.minimum, true) {
            self.minimum.map(Expected::Minimum)
        } else if below(self.exclusive_minimum, false) {
            self.exclusive_minimum.map(Expected::ExclusiveMinimum)
        } else if above(self.maximum, true) {
            self.maximum.map(Expected::Maximum)
        } else if above(self.exclusive_maximum, false) {
            self.exclusive_maximum.map(Expected::ExclusiveMaximum)
        } else {
            None
        };

        match violated {
            Some(expected) => Err(ValidationFailure::new(expected, subject)),
            None => Ok(()),
        }
    }

    fn describe_properties(&self, writer: &mut DocumentWriter) {
        let type_name = if self.requires_integer {
            JsonKind::Integer
        } else {
            JsonKind::Number
        };
        writer
            .key_value("type", type_name.as_str())
            .if_present("minimum", self.minimum.map(number_value))
            .if_present("exclusiveMinimum", self.exclusive_minimum.map(number_value))
            .if_present("maximum", self.maximum.map(number_value))
            .if_present("exclusiveMaximum", self.exclusive_maximum.map(number_value))
            .if_present("default", self.default.map(number_value));
    }
}

// Floats compare by bit pattern so that equality stays reflexive and agrees
// with the hash.
impl PartialEq for NumberSchema {
    fn eq(&self, other: &Self) -> bool {
        let bits = |bounds: [Option<f64>; 5]| bounds.map(|b| b.map(canonical_bits));
        self.metadata == other.metadata
            && self.requires_integer == other.requires_integer
            && bits(self.bounds()) == bits(other.bounds())
    }
}

impl Eq for NumberSchema {}

impl Hash for NumberSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata.hash(state);
        self.requires_integer.hash(state);
        for bound in self.bounds() {
            bound.is_some().hash(state);
            if let Some(value) = bound {
                hash_f64(value, state);
            }
        }
    }
}

// Integer subjects are compared exactly against integral bounds; `as_f64`
// rounds above 2^53.
fn compare(subject: &Value, number: f64, bound: f64) -> Option<Ordering> {
    let exact = subject
        .as_i64()
        .map(i128::from)
        .or_else(|| subject.as_u64().map(i128::from));
    match exact {
        Some(n) if bound.fract() == 0.0 && bound.abs() < I128_LIMIT => {
            Some(n.cmp(&(bound as i128)))
        }
        _ => number.partial_cmp(&bound),
    }
}

const I128_LIMIT: f64 = 1.7014118346046923e38;

fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}
