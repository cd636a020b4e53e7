//! Error and warning types for rendering.
//!
//! Errors abort a render call. Warnings describe data problems that only
//! cost a single relation and are handed back next to the response.

use layered_annotation::{AnnotationError, AnnotationId, Span};
use thiserror::Error;

/// Errors that abort a render call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// An offset that no sentence covers.
    #[error("no sentence covers offset {offset}")]
    SentenceNotFound { offset: usize },

    /// An annotation whose span does not start and end inside the window's
    /// sentences.
    #[error("unable to determine the sentences in which annotation {annotation} {span} starts/ends")]
    SpanResolution { annotation: AnnotationId, span: Span },

    /// A window request that cannot describe any window.
    #[error("invalid display window: {reason}")]
    InvalidWindow { reason: String },

    /// A type name that the schema does not declare.
    #[error("unknown annotation type '{0}'")]
    UnknownType(String),

    /// Any other inconsistency in the annotation model.
    #[error(transparent)]
    Model(AnnotationError),

    /// Preferences that could not be read or parsed.
    #[error("failed to load preferences: {path}: {message}")]
    Config { path: String, message: String },
}

impl From<AnnotationError> for RenderError {
    fn from(err: AnnotationError) -> Self {
        match err {
            AnnotationError::SentenceNotFound { offset } => RenderError::SentenceNotFound { offset },
            AnnotationError::UnknownType(name) => RenderError::UnknownType(name),
            other => RenderError::Model(other),
        }
    }
}

/// Non-fatal problems found while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A link or relation end pointing at an annotation that no longer exists.
    ///
    /// `feature` and `slot` locate the link on its owner; relation and chain
    /// layers leave them unset.
    DanglingReference {
        owner: AnnotationId,
        target: AnnotationId,
        feature: Option<usize>,
        slot: Option<usize>,
    },

    /// A reference feature that a relation needs but that is not set.
    MissingReference { owner: AnnotationId, feature: String },

    /// A chain link that exists but is not of the chain's link type.
    UnexpectedLinkType {
        owner: AnnotationId,
        target: AnnotationId,
        expected: String,
        found: String,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::DanglingReference {
                owner,
                target,
                feature,
                slot,
            } => {
                write!(f, "annotation {} refers to missing annotation {}", owner, target)?;
                if let (Some(feature), Some(slot)) = (feature, slot) {
                    write!(f, " (feature {}, link {})", feature, slot)?;
                }
                Ok(())
            }
            RenderWarning::MissingReference { owner, feature } => {
                write!(f, "annotation {} has no value for '{}'", owner, feature)
            }
            RenderWarning::UnexpectedLinkType {
                owner,
                target,
                expected,
                found,
            } => write!(
                f,
                "annotation {} links to {} of type '{}', expected '{}'",
                owner, target, found, expected
            ),
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
