//! Layer and feature declarations.
//!
//! The schema decides how a type is rendered (span, relation or chain) and
//! which of its features are scalar labels and which are slot features.

use serde::{Deserialize, Serialize};

use crate::{Annotation, AnnotationError, AnnotationResult};

/// Separator between feature values in a label.
pub const FEATURE_SEPARATOR: &str = " | ";

/// How a layer's annotations are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    /// Annotations drawn over their own text span
    Span,
    /// Arcs between two span annotations named by reference features
    Relation { governor: String, dependent: String },
    /// Linked lists of span annotations hanging off a chain annotation
    Chain {
        /// Feature on the chain pointing at its first link
        first: String,
        /// Feature on each link pointing at the next link
        next: String,
        /// Type name of the link annotations
        link_type: String,
        /// Feature on each link labeling the arc to the next link
        #[serde(default)]
        arc_label: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiValueMode {
    None,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkMode {
    None,
    Simple,
    WithRole,
}

fn default_true() -> bool {
    true
}

fn default_multi_value_mode() -> MultiValueMode {
    MultiValueMode::None
}

fn default_link_mode() -> LinkMode {
    LinkMode::None
}

/// A feature declared on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationFeature {
    pub name: String,
    #[serde(default)]
    pub ui_name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_multi_value_mode")]
    pub multi_value_mode: MultiValueMode,
    #[serde(default = "default_link_mode")]
    pub link_mode: LinkMode,
}

impl AnnotationFeature {
    /// A visible single-valued feature.
    pub fn scalar(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ui_name: name.to_string(),
            enabled: true,
            visible: true,
            multi_value_mode: MultiValueMode::None,
            link_mode: LinkMode::None,
        }
    }

    /// An array of role-labeled links.
    pub fn slot(name: &str) -> Self {
        Self {
            multi_value_mode: MultiValueMode::Array,
            link_mode: LinkMode::WithRole,
            ..Self::scalar(name)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// True for array features whose links carry a role.
    pub fn is_slot(&self) -> bool {
        self.multi_value_mode == MultiValueMode::Array && self.link_mode == LinkMode::WithRole
    }

    /// True for features that contribute to an annotation's label.
    pub fn is_label(&self) -> bool {
        self.enabled && self.visible && self.multi_value_mode == MultiValueMode::None
    }
}

/// A declared annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationLayer {
    pub id: u32,
    /// Type name annotations of this layer carry
    pub name: String,
    #[serde(default)]
    pub ui_name: String,
    pub kind: LayerKind,
    /// Declared features; their order defines feature positions
    #[serde(default)]
    pub features: Vec<AnnotationFeature>,
}

impl AnnotationLayer {
    pub fn new(id: u32, name: &str, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            ui_name: name.to_string(),
            kind,
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: AnnotationFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Type name on the wire: `{id}_{name}`.
    pub fn brat_type_name(&self) -> String {
        format!("{}_{}", self.id, self.name)
    }

    /// Declared features with their positions.
    pub fn features_enumerated(&self) -> impl Iterator<Item = (usize, &AnnotationFeature)> {
        self.features.iter().enumerate()
    }

    /// Label text: values of the given label features joined by
    /// [`FEATURE_SEPARATOR`], in the order given. Unset values render empty.
    pub fn label_text(&self, annotation: &Annotation, features: &[AnnotationFeature]) -> String {
        let parts: Vec<String> = features
            .iter()
            .filter(|feature| feature.is_label())
            .map(|feature| {
                annotation
                    .feature(&feature.name)
                    .and_then(|value| value.as_label())
                    .unwrap_or_default()
            })
            .collect();
        parts.join(FEATURE_SEPARATOR)
    }
}

/// All layers known to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub layers: Vec<AnnotationLayer>,
}

impl FeatureSchema {
    /// Build a schema, rejecting duplicate type names.
    pub fn new(layers: Vec<AnnotationLayer>) -> AnnotationResult<Self> {
        for (idx, layer) in layers.iter().enumerate() {
            if layers[..idx].iter().any(|other| other.name == layer.name) {
                return Err(AnnotationError::DuplicateLayer(layer.name.clone()));
            }
        }
        Ok(Self { layers })
    }

    /// Parse a schema from RON.
    pub fn from_ron(s: &str) -> AnnotationResult<Self> {
        let parsed: FeatureSchema =
            ron::from_str(s).map_err(|e| AnnotationError::SchemaParse(e.to_string()))?;
        Self::new(parsed.layers)
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(6)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    /// The layer declaring `type_name`.
    pub fn layer(&self, type_name: &str) -> AnnotationResult<&AnnotationLayer> {
        self.layers
            .iter()
            .find(|layer| layer.name == type_name)
            .ok_or_else(|| AnnotationError::UnknownType(type_name.to_string()))
    }
}
