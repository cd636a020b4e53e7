#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Windowed brat rendering of layered annotations.
//!
//! Turns the annotations of a [`layered_annotation::Document`] into the JSON
//! structures the brat visualizer draws: entities with per-sentence
//! fragments, arcs for slot features, relation layers and chains.
//!
//! ## Modules
//!
//! - [`window`] - Resolving a page of sentences
//! - [`fragment`] - Splitting spans into per-sentence fragments
//! - [`slots`] - Expanding slot features into arcs
//! - [`coloring`] - Coloring strategies
//! - [`renderer`] - Layer renderers and entry points
//! - [`model`] - The brat wire format
//! - [`config`] - Render preferences
//! - [`display`] - Plain-text overlay of a response
//!
//! ## Example
//!
//! ```
//! use layered_annotation::{
//!     AnnotationFeature, AnnotationLayer, AnnotationStore, Document, FeatureValue, LayerKind, Span,
//! };
//! use layered_brat::{render_layer, LabelHashColoring, WindowRequest};
//!
//! let doc = Document::from_text("The cat sat. It slept well.");
//! let layer = AnnotationLayer::new(1, "Entity", LayerKind::Span)
//!     .with_feature(AnnotationFeature::scalar("value"));
//!
//! let mut store = AnnotationStore::new();
//! let mut features = std::collections::BTreeMap::new();
//! features.insert("value".to_string(), FeatureValue::from("ANIMAL"));
//! store.add("Entity", Span { begin: 4, end: 7 }, features).unwrap();
//!
//! let outcome = render_layer(
//!     &doc,
//!     &store,
//!     &layer,
//!     &layer.features,
//!     &WindowRequest::new(0, 10),
//!     &LabelHashColoring::pastel(),
//! )
//! .unwrap();
//! assert_eq!(outcome.response.entities.len(), 1);
//! assert_eq!(outcome.response.entities[0].label, "ANIMAL");
//! ```

pub mod coloring;
pub mod config;
pub mod display;
pub mod errors;
pub mod fragment;
pub mod model;
pub mod renderer;
pub mod slots;
pub mod window;

pub use coloring::{
    label_hash, Color, ColorKey, ColoringPolicy, ColoringStrategy, KeyedColoring,
    LabelHashColoring, Palette, StaticColoring, DISABLED, PALETTE_NORMAL, PALETTE_PASTEL,
};
pub use config::{RenderPreferences, DEFAULT_WINDOW_SIZE};
pub use display::{index_to_label, ResponseDisplay};
pub use errors::{RenderError, RenderResult, RenderWarning};
pub use fragment::fragment_span;
pub use model::{Argument, Entity, GetDocumentResponse, Offsets, ParseVidError, Relation, Vid};
pub use renderer::{
    render_layer, ChainRenderer, LayerRenderer, RelationRenderer, RenderContext, RenderOutcome,
    Renderer, SpanRenderer, TypeRenderer,
};
pub use slots::{SlotLinks, SlotResolver};
pub use window::{DisplayWindow, WindowRequest};
