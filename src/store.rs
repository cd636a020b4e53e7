//! Arena storage for annotations.
//!
//! Annotations refer to each other by [`AnnotationId`], never by pointer.
//! Removing an annotation leaves a tombstone so that stale references are
//! detected instead of resolving to a different annotation.

use std::collections::{BTreeMap, HashMap};

use crate::{Annotation, AnnotationError, AnnotationId, AnnotationResult, FeatureValue, Span};

/// Read-mostly arena of annotations with a per-type positional index.
#[derive(Debug, Default, Clone)]
pub struct AnnotationStore {
    slots: Vec<Option<Annotation>>,
    /// Per type: ids sorted by (begin, id)
    by_type: HashMap<String, Vec<AnnotationId>>,
}

/// Id for the annotation stored at slot `len`.
fn next_id(len: usize) -> AnnotationResult<AnnotationId> {
    u32::try_from(len)
        .map(AnnotationId)
        .map_err(|_| AnnotationError::StoreFull { len })
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation and return its id.
    pub fn add(
        &mut self,
        type_name: &str,
        span: Span,
        features: BTreeMap<String, FeatureValue>,
    ) -> AnnotationResult<AnnotationId> {
        if span.end < span.begin {
            return Err(AnnotationError::InvalidSpan {
                begin: span.begin,
                end: span.end,
            });
        }

        let id = next_id(self.slots.len())?;
        let ids = self.by_type.entry(type_name.to_string()).or_default();
        // ids only grow, so equal begins keep insertion order
        let pos = ids.partition_point(|other| {
            self.slots[other.0 as usize]
                .as_ref()
                .map_or(true, |ann| ann.span.begin <= span.begin)
        });
        ids.insert(pos, id);

        self.slots.push(Some(Annotation {
            id,
            type_name: type_name.to_string(),
            span,
            features,
        }));
        Ok(id)
    }

    /// Set one feature on an existing annotation.
    ///
    /// Returns false if the annotation does not exist.
    pub fn set_feature(
        &mut self,
        id: AnnotationId,
        name: &str,
        value: impl Into<FeatureValue>,
    ) -> bool {
        match self.slots.get_mut(id.0 as usize).and_then(Option::as_mut) {
            Some(ann) => {
                ann.features.insert(name.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Remove an annotation. References to it become dangling.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let removed = self.slots.get_mut(id.0 as usize)?.take()?;
        if let Some(ids) = self.by_type.get_mut(&removed.type_name) {
            ids.retain(|other| *other != id);
        }
        Some(removed)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// All live annotations of a type, ordered by begin offset then
    /// insertion order.
    pub fn select_type<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.by_type
            .get(type_name)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| self.get(*id))
    }

    /// Annotations of a type that overlap `range`, in the order of
    /// [`select_type`](Self::select_type).
    pub fn select_overlapping<'a>(
        &'a self,
        type_name: &str,
        range: Span,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.select_type(type_name)
            .take_while(move |ann| ann.span.begin <= range.end)
            .filter(move |ann| ann.span.overlaps(&range))
    }

    /// Number of live annotations.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
