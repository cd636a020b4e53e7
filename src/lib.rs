#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Read-only annotation model for layered rendering.
//!
//! ## Core Types
//!
//! - [`Document`] / [`Sentence`] / [`Span`] - Text with sentence boundaries
//! - [`SentenceIndex`] - Windowing queries over sentences
//! - [`AnnotationStore`] - Arena of [`Annotation`]s addressed by [`AnnotationId`]
//! - [`FeatureSchema`] - Layer and feature declarations
//!
//! ## Example
//!
//! ```
//! use layered_annotation::Document;
//!
//! let doc = Document::from_text("The cat sat. It slept well.");
//! assert_eq!(doc.sentence_count(), 2);
//!
//! let index = doc.sentence_index();
//! assert_eq!(index.sentence_containing(14).unwrap().ordinal, 1);
//! assert!(index.sentence_containing(12).is_err());
//! ```

mod annotation;
mod document;
mod error;
mod schema;
mod sentence_index;
mod store;

pub use annotation::{Annotation, AnnotationId, FeatureValue, LinkWithRole};
pub use document::{Document, Sentence, Span};
pub use error::{AnnotationError, AnnotationResult};
pub use schema::{
    AnnotationFeature, AnnotationLayer, FeatureSchema, LayerKind, LinkMode, MultiValueMode,
    FEATURE_SEPARATOR,
};
pub use sentence_index::SentenceIndex;
pub use store::AnnotationStore;
