//! Validation failures

use serde_json::{json, Value};
use thiserror::Error;

use crate::kind::JsonKind;

/// Result type for validation
pub type Result<T> = std::result::Result<T, ValidationFailure>;

/// The constraint a subject was expected to satisfy
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Subject must have this JSON type
    Type(JsonKind),
    MinLength(usize),
    MaxLength(usize),
    Minimum(f64),
    ExclusiveMinimum(f64),
    Maximum(f64),
    ExclusiveMaximum(f64),
    /// Subject must equal one of these values
    OneOf(Vec<Value>),
    MinItems(usize),
    MaxItems(usize),
    RequiredProperty(String),
    NoAdditionalProperty(String),
    /// Several child schemas failed; see `causes`
    Violations(usize),
}

impl Expected {
    /// Schema keyword that produced this expectation
    pub fn keyword(&self) -> &'static str {
        match self {
            Expected::Type(_) => "type",
            Expected::MinLength(_) => "minLength",
            Expected::MaxLength(_) => "maxLength",
            Expected::Minimum(_) => "minimum",
            Expected::ExclusiveMinimum(_) => "exclusiveMinimum",
            Expected::Maximum(_) => "maximum",
            Expected::ExclusiveMaximum(_) => "exclusiveMaximum",
            Expected::OneOf(_) => "enum",
            Expected::MinItems(_) => "minItems",
            Expected::MaxItems(_) => "maxItems",
            Expected::RequiredProperty(_) => "required",
            Expected::NoAdditionalProperty(_) => "additionalProperties",
            Expected::Violations(_) => "",
        }
    }

    fn message_for(&self, actual: &Value) -> String {
        let length = || actual.as_str().map(|s| s.chars().count()).unwrap_or(0);
        let count = || actual.as_array().map(Vec::len).unwrap_or(0);
        match self {
            Expected::Type(kind) => {
                format!("expected type: {}, found: {}", kind, JsonKind::of(actual))
            }
            Expected::MinLength(n) => format!("expected minLength: {}, actual: {}", n, length()),
            Expected::MaxLength(n) => format!("expected maxLength: {}, actual: {}", n, length()),
            Expected::Minimum(x) => format!("{} is not greater or equal to {}", actual, x),
            Expected::ExclusiveMinimum(x) => format!("{} is not greater than {}", actual, x),
            Expected::Maximum(x) => format!("{} is not less or equal to {}", actual, x),
            Expected::ExclusiveMaximum(x) => format!("{} is not less than {}", actual, x),
            Expected::OneOf(_) => format!("{} is not a valid enum value", actual),
            Expected::MinItems(n) => {
                format!("expected minimum item count: {}, found: {}", n, count())
            }
            Expected::MaxItems(n) => {
                format!("expected maximum item count: {}, found: {}", n, count())
            }
            Expected::RequiredProperty(name) => format!("required key [{}] not found", name),
            Expected::NoAdditionalProperty(name) => {
                format!("extraneous key [{}] is not permitted", name)
            }
            Expected::Violations(n) => format!("{} schema violations found", n),
        }
    }
}

/// A subject that did not satisfy a schema.
///
/// Leaf failures name one expectation and the offending value. Failures from
/// composite schemas nest: a parent with several failing children reports
/// `Expected::Violations` and keeps each child failure in `causes`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{pointer}: {message}")]
pub struct ValidationFailure {
    expected: Expected,
    actual: Value,
    pointer: String,
    message: String,
    causes: Vec<ValidationFailure>,
}

impl ValidationFailure {
    /// Create a failure at the root pointer `#`
    pub fn new(expected: Expected, actual: &Value) -> Self {
        let message = expected.message_for(actual);
        Self {
            expected,
            actual: actual.clone(),
            pointer: "#".to_string(),
            message,
            causes: Vec::new(),
        }
    }

    /// Subject has the wrong JSON type
    pub fn type_mismatch(expected: JsonKind, actual: &Value) -> Self {
        Self::new(Expected::Type(expected), actual)
    }

    /// Merge child failures found while validating `subject`.
    ///
    /// No failures is success, a single failure is returned as is, and
    /// several are wrapped in one `Violations` failure.
    pub fn aggregate(subject: &Value, mut failures: Vec<ValidationFailure>) -> Result<()> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => {
                let count = failures.iter().map(ValidationFailure::violation_count).sum();
                let mut failure = Self::new(Expected::Violations(count), subject);
                failure.causes = failures;
                Err(failure)
            }
        }
    }

    /// Move this failure (and its causes) under a parent path segment
    pub fn prefixed(mut self, segment: &str) -> Self {
        self.prefix_with(&escape_segment(segment));
        self
    }

    fn prefix_with(&mut self, escaped: &str) {
        let rest = self.pointer.strip_prefix('#').unwrap_or(&self.pointer);
        self.pointer = format!("#/{}{}", escaped, rest);
        for cause in &mut self.causes {
            cause.prefix_with(escaped);
        }
    }

    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// JSON pointer of the violating value, rooted at `#`
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self.expected.keyword() {
            "" => None,
            keyword => Some(keyword),
        }
    }

    pub fn causes(&self) -> &[ValidationFailure] {
        &self.causes
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.expected, Expected::Type(_))
    }

    /// Number of leaf violations in this failure tree
    pub fn violation_count(&self) -> usize {
        if self.causes.is_empty() {
            1
        } else {
            self.causes.iter().map(ValidationFailure::violation_count).sum()
        }
    }

    /// Messages of every leaf violation, depth first
    pub fn messages(&self) -> Vec<String> {
        if self.causes.is_empty() {
            return vec![self.to_string()];
        }
        self.causes.iter().flat_map(ValidationFailure::messages).collect()
    }

    /// Structured report of the failure tree
    pub fn to_json(&self) -> Value {
        let mut report = json!({
            "pointerToViolation": self.pointer,
            "message": self.to_string(),
        });
        if let Some(keyword) = self.keyword() {
            report["keyword"] = json!(keyword);
        }
        if !self.causes.is_empty() {
            report["causingExceptions"] =
                Value::Array(self.causes.iter().map(ValidationFailure::to_json).collect());
        }
        report
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_message() {
        let failure = ValidationFailure::type_mismatch(JsonKind::Boolean, &json!("text"));
        assert!(failure.is_type_mismatch());
        assert_eq!(failure.expected(), &Expected::Type(JsonKind::Boolean));
        assert_eq!(failure.actual(), &json!("text"));
        assert_eq!(failure.to_string(), "#: expected type: boolean, found: string");
        assert_eq!(failure.keyword(), Some("type"));
    }

    #[test]
    fn test_prefix_nests_pointer() {
        let failure = ValidationFailure::type_mismatch(JsonKind::Null, &json!(1))
            .prefixed("0")
            .prefixed("items");
        assert_eq!(failure.pointer(), "#/items/0");
    }

    #[test]
    fn test_prefix_escapes_segment() {
        let failure = ValidationFailure::type_mismatch(JsonKind::Null, &json!(1)).prefixed("a/b~c");
        assert_eq!(failure.pointer(), "#/a~1b~0c");
    }

    #[test]
    fn test_aggregate_single_is_unchanged() {
        let child = ValidationFailure::type_mismatch(JsonKind::String, &json!(1)).prefixed("name");
        let err = ValidationFailure::aggregate(&json!({"name": 1}), vec![child.clone()]).unwrap_err();
        assert_eq!(err, child);
    }

    #[test]
    fn test_aggregate_many() {
        let subject = json!({"a": 1, "b": 2});
        let children = vec![
            ValidationFailure::type_mismatch(JsonKind::String, &json!(1)).prefixed("a"),
            ValidationFailure::type_mismatch(JsonKind::String, &json!(2)).prefixed("b"),
        ];
        let err = ValidationFailure::aggregate(&subject, children).unwrap_err();
        assert_eq!(err.expected(), &Expected::Violations(2));
        assert_eq!(err.violation_count(), 2);
        assert_eq!(err.keyword(), None);
        assert_eq!(
            err.messages(),
            vec![
                "#/a: expected type: string, found: number".to_string(),
                "#/b: expected type: string, found: number".to_string(),
            ]
        );

        let nested = err.prefixed("outer");
        assert_eq!(nested.pointer(), "#/outer");
        assert_eq!(nested.causes()[1].pointer(), "#/outer/b");
    }

    #[test]
    fn test_aggregate_empty_is_ok() {
        assert!(ValidationFailure::aggregate(&json!([]), Vec::new()).is_ok());
    }

    #[test]
    fn test_report_json() {
        let children = vec![
            ValidationFailure::new(Expected::RequiredProperty("id".into()), &json!({})),
            ValidationFailure::new(Expected::MinLength(3), &json!("ab")).prefixed("code"),
        ];
        let err = ValidationFailure::aggregate(&json!({}), children).unwrap_err();
        let report = err.to_json();
        assert_eq!(report["pointerToViolation"], "#");
        assert_eq!(report["message"], "#: 2 schema violations found");
        assert!(report.get("keyword").is_none());
        assert_eq!(report["causingExceptions"][0]["keyword"], "required");
        assert_eq!(
            report["causingExceptions"][1]["message"],
            "#/code: expected minLength: 3, actual: 2"
        );
    }
}
