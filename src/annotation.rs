//! Annotations and their feature values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Span;

/// Stable address of an annotation inside an [`AnnotationStore`](crate::AnnotationStore).
///
/// Ids are handed out in insertion order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u32);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One role-labeled link held by a slot feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkWithRole {
    /// Free-text role, e.g. "ARG0"
    pub role: String,
    pub target: AnnotationId,
}

impl LinkWithRole {
    pub fn new(role: impl Into<String>, target: AnnotationId) -> Self {
        Self {
            role: role.into(),
            target,
        }
    }
}

/// The value stored under a feature name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Reference to another annotation (relation ends, chain links)
    Reference(AnnotationId),
    /// Ordered role-labeled links (slot features)
    Links(Vec<LinkWithRole>),
}

impl FeatureValue {
    /// Text shown for this value in a label, `None` for values that have no
    /// scalar rendering.
    pub fn as_label(&self) -> Option<String> {
        match self {
            FeatureValue::Null => None,
            FeatureValue::Bool(b) => Some(b.to_string()),
            FeatureValue::Integer(i) => Some(i.to_string()),
            FeatureValue::Float(x) => Some(x.to_string()),
            FeatureValue::String(s) => Some(s.clone()),
            FeatureValue::Reference(_) | FeatureValue::Links(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<AnnotationId> {
        match self {
            FeatureValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&[LinkWithRole]> {
        match self {
            FeatureValue::Links(links) => Some(links),
            _ => None,
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::String(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::String(value)
    }
}

impl From<AnnotationId> for FeatureValue {
    fn from(value: AnnotationId) -> Self {
        FeatureValue::Reference(value)
    }
}

impl From<Vec<LinkWithRole>> for FeatureValue {
    fn from(value: Vec<LinkWithRole>) -> Self {
        FeatureValue::Links(value)
    }
}

/// An annotation of a declared type over a document span.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub type_name: String,
    pub span: Span,
    pub features: BTreeMap<String, FeatureValue>,
}

impl Annotation {
    pub fn begin(&self) -> usize {
        self.span.begin
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Value of a feature, `None` if it was never set.
    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    /// Links held by a slot feature; an unset feature has no links.
    pub fn links(&self, name: &str) -> &[LinkWithRole] {
        self.feature(name)
            .and_then(FeatureValue::as_links)
            .unwrap_or(&[])
    }

    pub fn reference(&self, name: &str) -> Option<AnnotationId> {
        self.feature(name).and_then(FeatureValue::as_reference)
    }
}
