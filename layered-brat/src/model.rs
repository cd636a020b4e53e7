//! Wire model of a brat `getDocument` response.
//!
//! brat reads entities, relations, offsets and arguments as positional JSON
//! arrays, so those types serialize as tuples in a fixed field order:
//!
//! - entity: `[id, type, [[start, end], ...], label, color]`
//! - relation: `[id, type, [["Arg1", id], ["Arg2", id]], label, color]`

use std::fmt;
use std::str::FromStr;

use layered_annotation::AnnotationId;
use serde::{Serialize, Serializer};

use crate::Color;

/// Window-relative `[start, end)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offsets {
    pub begin: usize,
    pub end: usize,
}

impl Offsets {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }
}

impl Serialize for Offsets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.begin, self.end).serialize(serializer)
    }
}

/// Visual id: addresses an annotation, or one link occurrence on it.
///
/// Renders as `id`, `id.attribute` or `id.attribute.slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vid {
    pub id: AnnotationId,
    /// Feature position (or arc position for chains)
    pub attribute: Option<usize>,
    /// Link position inside a slot feature
    pub slot: Option<usize>,
}

impl Vid {
    pub fn new(id: AnnotationId) -> Self {
        Self {
            id,
            attribute: None,
            slot: None,
        }
    }

    pub fn with_attribute(id: AnnotationId, attribute: usize) -> Self {
        Self {
            id,
            attribute: Some(attribute),
            slot: None,
        }
    }

    /// Id of link `slot` of the feature at position `attribute`.
    pub fn slot(id: AnnotationId, attribute: usize, slot: usize) -> Self {
        Self {
            id,
            attribute: Some(attribute),
            slot: Some(slot),
        }
    }
}

impl From<AnnotationId> for Vid {
    fn from(id: AnnotationId) -> Self {
        Vid::new(id)
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(attribute) = self.attribute {
            write!(f, ".{}", attribute)?;
            if let Some(slot) = self.slot {
                write!(f, ".{}", slot)?;
            }
        }
        Ok(())
    }
}

/// Error parsing a [`Vid`] sent back by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVidError(pub String);

impl fmt::Display for ParseVidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid visual id '{}'", self.0)
    }
}

impl std::error::Error for ParseVidError {}

impl FromStr for Vid {
    type Err = ParseVidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVidError(s.to_string());
        let mut parts = s.split('.');
        let id = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(err)?;
        let mut numbers = Vec::new();
        for part in parts {
            numbers.push(part.parse::<usize>().map_err(|_| err())?);
        }
        match numbers.as_slice() {
            [] => Ok(Vid::new(AnnotationId(id))),
            [attribute] => Ok(Vid::with_attribute(AnnotationId(id), *attribute)),
            [attribute, slot] => Ok(Vid::slot(AnnotationId(id), *attribute, *slot)),
            _ => Err(err()),
        }
    }
}

impl Serialize for Vid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named relation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub role: String,
    pub target: Vid,
}

impl Argument {
    pub fn new(role: &str, target: Vid) -> Self {
        Self {
            role: role.to_string(),
            target,
        }
    }

    /// The `[Arg1 = source, Arg2 = target]` pair every arc carries.
    pub fn pair(source: AnnotationId, target: AnnotationId) -> Vec<Argument> {
        vec![
            Argument::new("Arg1", Vid::new(source)),
            Argument::new("Arg2", Vid::new(target)),
        ]
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.role, &self.target).serialize(serializer)
    }
}

/// A rendered span: one or more fragments under one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub vid: Vid,
    pub type_name: String,
    pub offsets: Vec<Offsets>,
    pub label: String,
    pub color: Color,
}

impl Entity {
    pub fn new(
        vid: Vid,
        type_name: impl Into<String>,
        offsets: Vec<Offsets>,
        label: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            vid,
            type_name: type_name.into(),
            offsets,
            label: label.into(),
            color,
        }
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.vid,
            &self.type_name,
            &self.offsets,
            &self.label,
            &self.color,
        )
            .serialize(serializer)
    }
}

/// A rendered arc between two annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub vid: Vid,
    pub type_name: String,
    pub arguments: Vec<Argument>,
    pub label: String,
    pub color: Color,
}

impl Relation {
    pub fn new(
        vid: Vid,
        type_name: impl Into<String>,
        arguments: Vec<Argument>,
        label: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            vid,
            type_name: type_name.into(),
            arguments,
            label: label.into(),
            color,
        }
    }

    /// Target of the argument with the given role.
    pub fn argument(&self, role: &str) -> Option<Vid> {
        self.arguments
            .iter()
            .find(|arg| arg.role == role)
            .map(|arg| arg.target)
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.vid,
            &self.type_name,
            &self.arguments,
            &self.label,
            &self.color,
        )
            .serialize(serializer)
    }
}

/// Response to a brat `getDocument` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetDocumentResponse {
    pub action: String,
    /// Text of the visible window
    pub text: String,
    /// Window-relative sentence spans
    pub sentence_offsets: Vec<Offsets>,
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl Default for GetDocumentResponse {
    fn default() -> Self {
        Self {
            action: "getDocument".to_string(),
            text: String::new(),
            sentence_offsets: Vec::new(),
            entities: Vec::new(),
            relations: Vec::new(),
        }
    }
}

impl GetDocumentResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn entity(&self, vid: Vid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.vid == vid)
    }

    pub fn relation(&self, vid: Vid) -> Option<&Relation> {
        self.relations.iter().find(|r| r.vid == vid)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
