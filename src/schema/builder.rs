//! Schema builders
//!
//! A [`SchemaBuilder`] is a mutable draft of exactly one variant. Setters
//! consume and return the builder so calls chain, and [`SchemaBuilder::build`]
//! hands the draft over as the finished, immutable schema.
//!
//! Builders do not check constraint combinations: a string schema with
//! `min_length` above `max_length` builds fine and simply rejects every
//! subject at validation time.

use super::Metadata;

mod sealed {
    use super::Metadata;

    /// Implemented by variants that can be drafted by a builder
    pub trait Draft: Default {
        fn metadata_mut(&mut self) -> &mut Metadata;
    }
}

pub(crate) use sealed::Draft;

/// Builder bound to the variant `S`
#[derive(Debug, Clone)]
pub struct SchemaBuilder<S> {
    pub(super) draft: S,
}

impl<S: Draft> SchemaBuilder<S> {
    pub fn new() -> Self {
        Self { draft: S::default() }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.draft.metadata_mut().title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.metadata_mut().description = Some(description.into());
        self
    }

    /// Set the schema identifier (`$id`)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.draft.metadata_mut().id = Some(id.into());
        self
    }

    pub fn build(self) -> S {
        self.draft
    }
}

impl<S: Draft> Default for SchemaBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
