//! Layer renderers and the render entry points.
//!
//! Each layer kind has its own renderer. They share one resolved
//! [`DisplayWindow`] per call and write into one [`GetDocumentResponse`].

mod chain;
mod relation;
mod span;

pub use chain::ChainRenderer;
pub use relation::RelationRenderer;
pub use span::SpanRenderer;

use layered_annotation::{
    AnnotationFeature, AnnotationLayer, AnnotationStore, Document, FeatureSchema, LayerKind,
};

use crate::{
    ColoringStrategy, DisplayWindow, GetDocumentResponse, RenderPreferences, RenderResult,
    RenderWarning, WindowRequest,
};

/// What every layer renderer reads: the document, its annotations and the
/// resolved window.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub document: &'a Document,
    pub store: &'a AnnotationStore,
    pub window: DisplayWindow<'a>,
}

/// Capability shared by all layer renderers.
pub trait TypeRenderer {
    /// Append this layer's entities and relations for the window to
    /// `response`. Returns the non-fatal problems found on the way.
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        features: &[AnnotationFeature],
        coloring: &dyn ColoringStrategy,
        response: &mut GetDocumentResponse,
    ) -> RenderResult<Vec<RenderWarning>>;
}

/// The renderer for a layer, chosen by its kind.
#[derive(Debug, Clone, Copy)]
pub enum LayerRenderer<'a> {
    Span(SpanRenderer<'a>),
    Relation(RelationRenderer<'a>),
    Chain(ChainRenderer<'a>),
}

impl<'a> LayerRenderer<'a> {
    pub fn for_layer(layer: &'a AnnotationLayer) -> Self {
        match &layer.kind {
            LayerKind::Span => LayerRenderer::Span(SpanRenderer::new(layer)),
            LayerKind::Relation { governor, dependent } => {
                LayerRenderer::Relation(RelationRenderer::new(layer, governor, dependent))
            }
            LayerKind::Chain {
                first,
                next,
                link_type,
                arc_label,
            } => LayerRenderer::Chain(ChainRenderer::new(
                layer,
                first,
                next,
                link_type,
                arc_label.as_deref(),
            )),
        }
    }
}

impl<'a> TypeRenderer for LayerRenderer<'a> {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        features: &[AnnotationFeature],
        coloring: &dyn ColoringStrategy,
        response: &mut GetDocumentResponse,
    ) -> RenderResult<Vec<RenderWarning>> {
        match self {
            LayerRenderer::Span(r) => r.render(ctx, features, coloring, response),
            LayerRenderer::Relation(r) => r.render(ctx, features, coloring, response),
            LayerRenderer::Chain(r) => r.render(ctx, features, coloring, response),
        }
    }
}

/// A response plus the warnings collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub response: GetDocumentResponse,
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Empty response carrying the window text and sentence offsets.
fn window_response(document: &Document, window: &DisplayWindow<'_>) -> GetDocumentResponse {
    let mut response = GetDocumentResponse::new();
    response.text = document
        .covered_text(window.range())
        .map(str::to_string)
        .unwrap_or_default();
    response.sentence_offsets = window
        .visible
        .iter()
        .map(|sentence| window.relative(sentence.span))
        .collect();
    response
}

/// Render a single layer into a fresh response.
///
/// The window is resolved once; annotations of `layer` that overlap it are
/// drawn with `visible_features` as label features and `coloring` for colors.
pub fn render_layer(
    document: &Document,
    store: &AnnotationStore,
    layer: &AnnotationLayer,
    visible_features: &[AnnotationFeature],
    request: &WindowRequest,
    coloring: &dyn ColoringStrategy,
) -> RenderResult<RenderOutcome> {
    let index = document.sentence_index();
    let window = DisplayWindow::resolve(&index, request)?;
    let mut response = window_response(document, &window);

    let ctx = RenderContext {
        document,
        store,
        window,
    };
    let warnings =
        LayerRenderer::for_layer(layer).render(&ctx, visible_features, coloring, &mut response)?;

    Ok(RenderOutcome { response, warnings })
}

/// Renders several layers of a project with its preferences.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    schema: &'a FeatureSchema,
    preferences: &'a RenderPreferences,
}

impl<'a> Renderer<'a> {
    pub fn new(schema: &'a FeatureSchema, preferences: &'a RenderPreferences) -> Self {
        Self {
            schema,
            preferences,
        }
    }

    /// A request for the page starting at the sentence covering `offset`,
    /// sized by the preferences.
    pub fn request_at(&self, offset: usize) -> WindowRequest {
        WindowRequest::new(offset, self.preferences.window_size)
    }

    /// Render the given layers, in order, for one window.
    ///
    /// Every type name is checked against the schema before the window is
    /// resolved or any annotation is read.
    pub fn render(
        &self,
        document: &Document,
        store: &AnnotationStore,
        request: &WindowRequest,
        type_names: &[&str],
    ) -> RenderResult<RenderOutcome> {
        let layers = type_names
            .iter()
            .map(|name| self.schema.layer(name))
            .collect::<Result<Vec<_>, _>>()?;

        let index = document.sentence_index();
        let window = DisplayWindow::resolve(&index, request)?;
        let mut response = window_response(document, &window);
        let ctx = RenderContext {
            document,
            store,
            window,
        };

        let mut warnings = Vec::new();
        for layer in layers {
            let coloring = self.preferences.policy_for(&layer.name).build();
            let entities_before = response.entities.len();
            let relations_before = response.relations.len();

            let layer_warnings = LayerRenderer::for_layer(layer).render(
                &ctx,
                &layer.features,
                coloring.as_ref(),
                &mut response,
            )?;

            log::debug!(
                "rendered layer {}: {} entities, {} relations, {} warnings",
                layer.name,
                response.entities.len() - entities_before,
                response.relations.len() - relations_before,
                layer_warnings.len()
            );
            warnings.extend(layer_warnings);
        }

        Ok(RenderOutcome { response, warnings })
    }
}
