use layered_annotation::{AnnotationFeature, AnnotationLayer};

use super::{RenderContext, TypeRenderer};
use crate::{
    Argument, ColorKey, ColoringStrategy, GetDocumentResponse, Relation, RenderResult,
    RenderWarning, Vid,
};

/// Draws relation annotations as arcs from governor to dependent.
#[derive(Debug, Clone, Copy)]
pub struct RelationRenderer<'a> {
    layer: &'a AnnotationLayer,
    governor: &'a str,
    dependent: &'a str,
}

impl<'a> RelationRenderer<'a> {
    pub fn new(layer: &'a AnnotationLayer, governor: &'a str, dependent: &'a str) -> Self {
        Self {
            layer,
            governor,
            dependent,
        }
    }
}

impl<'a> TypeRenderer for RelationRenderer<'a> {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        features: &[AnnotationFeature],
        coloring: &dyn ColoringStrategy,
        response: &mut GetDocumentResponse,
    ) -> RenderResult<Vec<RenderWarning>> {
        let type_name = self.layer.brat_type_name();
        let mut warnings = Vec::new();

        for annotation in ctx.store.select_overlapping(&self.layer.name, ctx.window.range()) {
            let (governor, dependent) = match (
                annotation.reference(self.governor),
                annotation.reference(self.dependent),
            ) {
                (Some(governor), Some(dependent)) => (governor, dependent),
                (governor, _) => {
                    let feature = if governor.is_none() {
                        self.governor
                    } else {
                        self.dependent
                    };
                    log::warn!(
                        "relation {} of {} has no {} reference",
                        annotation.id,
                        self.layer.name,
                        feature
                    );
                    warnings.push(RenderWarning::MissingReference {
                        owner: annotation.id,
                        feature: feature.to_string(),
                    });
                    continue;
                }
            };

            let missing = [governor, dependent]
                .into_iter()
                .find(|id| ctx.store.get(*id).is_none());
            if let Some(target) = missing {
                log::warn!(
                    "relation {} of {} points at missing annotation {}",
                    annotation.id,
                    self.layer.name,
                    target
                );
                warnings.push(RenderWarning::DanglingReference {
                    owner: annotation.id,
                    target,
                    feature: None,
                    slot: None,
                });
                continue;
            }

            let label = self.layer.label_text(annotation, features);
            let color = coloring.color_for(&ColorKey::Annotation(annotation.id), &label);

            response.add_relation(Relation::new(
                Vid::new(annotation.id),
                type_name.clone(),
                Argument::pair(governor, dependent),
                label,
                color,
            ));
        }

        Ok(warnings)
    }
}
