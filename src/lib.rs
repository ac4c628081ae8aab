//! schemakit
//!
//! Immutable schema types that validate JSON values, describe themselves as
//! canonical documents, and compare structurally.
//!
//! ## Features
//!
//! - **Closed Variant Set**: boolean, string, number, null, enum, array and
//!   object schemas behind one [`Schema`] enum
//! - **Builders**: every schema is assembled through its own [`SchemaBuilder`]
//!   and is immutable once built
//! - **Structural Equality**: schemas of different variants never compare
//!   equal; equal schemas hash equally
//! - **Canonical Descriptions**: [`DocumentWriter`] keeps insertion order and
//!   skips absent optional keys
//! - **Structured Failures**: [`ValidationFailure`] carries the expectation,
//!   the offending value and a JSON pointer, and nests for composite schemas
//!
//! ## Example
//!
//! ```
//! use schemakit::{BooleanSchema, Variant};
//! use serde_json::json;
//!
//! let schema = BooleanSchema::builder().default_value(true).build();
//! assert!(schema.validate(&json!(false)).is_ok());
//! assert!(schema.validate(&json!("text")).is_err());
//! assert_eq!(schema.to_document(), json!({"type": "boolean", "default": true}));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod kind;
pub mod schema;
pub mod validator;

pub use config::{OutputFormat, SchemakitConfig};
pub use document::DocumentWriter;
pub use error::{Expected, Result, ValidationFailure};
pub use fingerprint::Fingerprint;
pub use kind::{JsonKind, SchemaKind};
pub use schema::{
    ArraySchema, BooleanSchema, EnumSchema, Metadata, NullSchema, NumberSchema, ObjectSchema,
    Schema, SchemaBuilder, StringSchema, Variant,
};
pub use validator::Validator;
