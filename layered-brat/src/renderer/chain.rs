use std::collections::HashSet;

use layered_annotation::{AnnotationFeature, AnnotationId, AnnotationLayer};

use super::{RenderContext, TypeRenderer};
use crate::{
    fragment_span, Argument, ColorKey, ColoringStrategy, Entity, GetDocumentResponse, Relation,
    RenderResult, RenderWarning, Vid,
};

/// Draws chains (e.g. coreference) as linked entities.
///
/// Every link inside the window becomes an entity and every pair of
/// consecutive links that are both visible becomes an arc. Arc `i` of a chain
/// (from link `i` to link `i + 1`) has the id `chain.i`, whatever the window.
/// All entities and arcs of a chain share the chain's color.
#[derive(Debug, Clone, Copy)]
pub struct ChainRenderer<'a> {
    layer: &'a AnnotationLayer,
    first: &'a str,
    next: &'a str,
    link_type: &'a str,
    arc_label: Option<&'a str>,
}

impl<'a> ChainRenderer<'a> {
    pub fn new(
        layer: &'a AnnotationLayer,
        first: &'a str,
        next: &'a str,
        link_type: &'a str,
        arc_label: Option<&'a str>,
    ) -> Self {
        Self {
            layer,
            first,
            next,
            link_type,
            arc_label,
        }
    }
}

impl<'a> TypeRenderer for ChainRenderer<'a> {
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
        let entity_features: Vec<AnnotationFeature> = features
            .iter()
            .filter(|feature| Some(feature.name.as_str()) != self.arc_label)
            .cloned()
            .collect();
        let mut warnings = Vec::new();

        for chain in ctx.store.select_type(&self.layer.name) {
            let chain_label = self.layer.label_text(chain, &entity_features);
            let color = coloring.color_for(&ColorKey::Annotation(chain.id), &chain_label);

            let mut seen = HashSet::new();
            let mut owner = chain.id;
            let mut next_id = chain.reference(self.first);
            // previous link, if it was drawn in this window
            let mut previous: Option<(AnnotationId, String)> = None;
            let mut arc_idx = 0;

            while let Some(link_id) = next_id {
                if !seen.insert(link_id) {
                    log::warn!("chain {} of {} loops back to link {}", chain.id, self.layer.name, link_id);
                    break;
                }

                let link = match ctx.store.get(link_id) {
                    Some(link) if link.type_name == self.link_type => link,
                    Some(other) => {
                        log::warn!(
                            "chain {} of {} links to {} of type {}",
                            chain.id,
                            self.layer.name,
                            link_id,
                            other.type_name
                        );
                        warnings.push(RenderWarning::UnexpectedLinkType {
                            owner,
                            target: link_id,
                            expected: self.link_type.to_string(),
                            found: other.type_name.clone(),
                        });
                        break;
                    }
                    None => {
                        log::warn!(
                            "chain {} of {} points at missing link {}",
                            chain.id,
                            self.layer.name,
                            link_id
                        );
                        warnings.push(RenderWarning::DanglingReference {
                            owner,
                            target: link_id,
                            feature: None,
                            slot: None,
                        });
                        break;
                    }
                };

                let visible = match link.span.clip_to(&range) {
                    Some(visible_span) => {
                        let offsets =
                            fragment_span(link.id, visible_span, window.visible, window.anchor())?;
                        response.add_entity(Entity::new(
                            Vid::new(link.id),
                            type_name.clone(),
                            offsets,
                            self.layer.label_text(link, &entity_features),
                            color.clone(),
                        ));
                        true
                    }
                    None => false,
                };

                if let Some((previous_id, arc_label)) = previous.take() {
                    if visible {
                        response.add_relation(Relation::new(
                            Vid::with_attribute(chain.id, arc_idx - 1),
                            type_name.clone(),
                            Argument::pair(previous_id, link.id),
                            arc_label,
                            color.clone(),
                        ));
                    }
                }

                if visible {
                    let arc_label = self
                        .arc_label
                        .and_then(|name| link.feature(name))
                        .and_then(|value| value.as_label())
                        .unwrap_or_default();
                    previous = Some((link.id, arc_label));
                }

                arc_idx += 1;
                owner = link.id;
                next_id = link.reference(self.next);
            }
        }

        Ok(warnings)
    }
}
