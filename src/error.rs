//! Error types for the annotation model.

use thiserror::Error;

use crate::Span;

/// Errors raised while building or querying the annotation model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    /// No sentence covers the offset.
    #[error("no sentence covers offset {offset}")]
    SentenceNotFound { offset: usize },

    /// A span whose end lies before its begin.
    #[error("invalid span [{begin}, {end})")]
    InvalidSpan { begin: usize, end: usize },

    /// Sentence boundaries that break the sorted, non-overlapping invariant.
    #[error("invalid sentence {index} at {span}: {reason}")]
    InvalidSentences {
        index: usize,
        span: Span,
        reason: String,
    },

    /// A type name that the schema does not declare.
    #[error("unknown annotation type '{0}'")]
    UnknownType(String),

    /// Two layers declared under the same type name.
    #[error("layer '{0}' is declared more than once")]
    DuplicateLayer(String),

    /// The store cannot hand out another annotation id.
    #[error("annotation store is full ({len} annotations)")]
    StoreFull { len: usize },

    /// A schema document that could not be parsed.
    #[error("failed to parse schema: {0}")]
    SchemaParse(String),
}

/// Result type for annotation model operations.
pub type AnnotationResult<T> = Result<T, AnnotationError>;
