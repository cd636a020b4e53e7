//! Expanding slot features into relation arcs.
//!
//! A slot feature holds an ordered list of role-labeled links from its owner
//! to other annotations. Each link becomes one arc whose id
//! `owner.feature.link` addresses that exact link occurrence.

use layered_annotation::{Annotation, AnnotationLayer, AnnotationStore};

use crate::{Argument, ColorKey, ColoringStrategy, Relation, RenderWarning, Vid};

/// Arcs produced for one owner, plus the links that could not be resolved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SlotLinks {
    pub relations: Vec<Relation>,
    pub warnings: Vec<RenderWarning>,
}

/// Resolves slot links against a store.
pub struct SlotResolver<'a> {
    store: &'a AnnotationStore,
    coloring: &'a dyn ColoringStrategy,
}

impl<'a> SlotResolver<'a> {
    pub fn new(store: &'a AnnotationStore, coloring: &'a dyn ColoringStrategy) -> Self {
        Self { store, coloring }
    }

    /// One relation per link of every slot feature `layer` declares on
    /// `owner`, in feature order then link order.
    ///
    /// `label` is the owner's display label; link colors are chosen from it
    /// and the link's own identity. A link whose target is gone is skipped
    /// and reported as a warning.
    pub fn resolve(&self, owner: &Annotation, layer: &AnnotationLayer, label: &str) -> SlotLinks {
        let mut out = SlotLinks::default();
        let type_name = layer.brat_type_name();

        for (fi, feature) in layer.features_enumerated() {
            if !feature.is_slot() {
                continue;
            }

            for (li, link) in owner.links(&feature.name).iter().enumerate() {
                let target = match self.store.get(link.target) {
                    Some(target) => target,
                    None => {
                        log::warn!(
                            "slot link {}.{}.{} of {} points at missing annotation {}",
                            owner.id,
                            fi,
                            li,
                            layer.name,
                            link.target
                        );
                        out.warnings.push(RenderWarning::DanglingReference {
                            owner: owner.id,
                            target: link.target,
                            feature: Some(fi),
                            slot: Some(li),
                        });
                        continue;
                    }
                };

                let key = ColorKey::Link {
                    source: owner.id,
                    target: target.id,
                    feature: fi,
                    slot: li,
                };
                let color = self.coloring.color_for(&key, label);

                out.relations.push(Relation::new(
                    Vid::slot(owner.id, fi, li),
                    type_name.clone(),
                    Argument::pair(owner.id, target.id),
                    link.role.clone(),
                    color,
                ));
            }
        }

        out
    }
}
