//! Validation dispatch
//!
//! A [`Validator`] runs a schema against a subject. Each schema node fails
//! fast on its own constraints; composite nodes validate their children
//! through the validator and merge child failures, or stop at the first one
//! when `fail_early` is set.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::schema::Schema;

/// Validation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    fail_early: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new().fail_early(config.fail_early)
    }

    /// Stop composite validation at the first failing child
    pub fn fail_early(mut self, fail_early: bool) -> Self {
        self.fail_early = fail_early;
        self
    }

    pub fn is_fail_early(&self) -> bool {
        self.fail_early
    }

    pub fn validate(&self, schema: &Schema, subject: &Value) -> Result<()> {
        trace!(kind = %schema.kind(), "validating subject");
        let result = schema.validate_with(subject, self);
        if let Err(failure) = &result {
            debug!(
                kind = %schema.kind(),
                pointer = failure.pointer(),
                violations = failure.violation_count(),
                "validation failed: {}",
                failure.message()
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, NumberSchema};
    use serde_json::json;

    #[test]
    fn test_default_collects_all() {
        assert!(!Validator::default().is_fail_early());
    }

    #[test]
    fn test_from_config() {
        let config = ValidationConfig { fail_early: true };
        assert!(Validator::from_config(&config).is_fail_early());
    }

    #[test]
    fn test_validate_dispatches() {
        let schema: Schema = ArraySchema::builder()
            .items(NumberSchema::builder().maximum(1.0).build())
            .build()
            .into();
        let validator = Validator::new();
        assert!(validator.validate(&schema, &json!([0, 1])).is_ok());
        let all = validator.validate(&schema, &json!([2, 3])).unwrap_err();
        assert_eq!(all.violation_count(), 2);
        let first = validator
            .fail_early(true)
            .validate(&schema, &json!([2, 3]))
            .unwrap_err();
        assert_eq!(first.violation_count(), 1);
    }
}
