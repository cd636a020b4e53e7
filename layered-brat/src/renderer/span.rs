use layered_annotation::{AnnotationFeature, AnnotationLayer};

use super::{RenderContext, TypeRenderer};
use crate::{
    fragment_span, ColorKey, ColoringStrategy, Entity, GetDocumentResponse, RenderResult,
    RenderWarning, SlotResolver, Vid,
};

/// Draws span annotations as entities and their slot features as arcs.
#[derive(Debug, Clone, Copy)]
pub struct SpanRenderer<'a> {
    layer: &'a AnnotationLayer,
}

impl<'a> SpanRenderer<'a> {
    pub fn new(layer: &'a AnnotationLayer) -> Self {
        Self { layer }
    }
}

impl<'a> TypeRenderer for SpanRenderer<'a> {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        features: &[AnnotationFeature],
        coloring: &dyn ColoringStrategy,
        response: &mut GetDocumentResponse,
    ) -> RenderResult<Vec<RenderWarning>> {
        let window = &ctx.window;
        let range = window.range();
        let type_name = self.layer.brat_type_name();
        let slots = SlotResolver::new(ctx.store, coloring);
        let mut warnings = Vec::new();

        for annotation in ctx.store.select_overlapping(&self.layer.name, range) {
            let label = self.layer.label_text(annotation, features);
            let color = coloring.color_for(&ColorKey::Annotation(annotation.id), &label);

            // only the part inside the window is drawn
            let visible_span = annotation.span.clip_to(&range).unwrap_or(annotation.span);
            let offsets = fragment_span(annotation.id, visible_span, window.visible, window.anchor())?;

            response.add_entity(Entity::new(
                Vid::new(annotation.id),
                type_name.clone(),
                offsets,
                label.clone(),
                color,
            ));

            let links = slots.resolve(annotation, self.layer, &label);
            response.relations.extend(links.relations);
            warnings.extend(links.warnings);
        }

        Ok(warnings)
    }
}
