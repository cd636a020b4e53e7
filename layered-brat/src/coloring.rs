//! Coloring strategies.
//!
//! A strategy maps an identity key and a label to a display color. Every
//! strategy is a pure, total function: unknown labels still get a color.

use std::collections::HashMap;
use std::fmt;

use layered_annotation::AnnotationId;
use serde::{Deserialize, Serialize};

/// A `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Color for disabled or unresolvable items.
pub const DISABLED: &str = "#bebebe";

/// Light palette, suited to dense span layers.
pub const PALETTE_PASTEL: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Saturated palette.
pub const PALETTE_NORMAL: [&str; 12] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

/// What a color is being chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    /// An annotation drawn as a span or arc
    Annotation(AnnotationId),
    /// One link occurrence: link `slot` of feature `feature` on `source`,
    /// pointing at `target`
    Link {
        source: AnnotationId,
        target: AnnotationId,
        feature: usize,
        slot: usize,
    },
}

pub trait ColoringStrategy {
    fn color_for(&self, key: &ColorKey, label: &str) -> Color;
}

impl<T: ColoringStrategy + ?Sized> ColoringStrategy for Box<T> {
    fn color_for(&self, key: &ColorKey, label: &str) -> Color {
        (**self).color_for(key, label)
    }
}

impl<T: ColoringStrategy + ?Sized> ColoringStrategy for &T {
    fn color_for(&self, key: &ColorKey, label: &str) -> Color {
        (**self).color_for(key, label)
    }
}

/// One color for everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticColoring(pub Color);

impl ColoringStrategy for StaticColoring {
    fn color_for(&self, _key: &ColorKey, _label: &str) -> Color {
        self.0.clone()
    }
}

/// Picks a palette entry from a stable hash of the label, so equal labels
/// share a color across windows and sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHashColoring {
    palette: Vec<Color>,
}

impl LabelHashColoring {
    pub fn new(palette: &[&str]) -> Self {
        Self {
            palette: palette.iter().map(|hex| Color::new(hex)).collect(),
        }
    }

    pub fn pastel() -> Self {
        Self::new(&PALETTE_PASTEL)
    }

    pub fn normal() -> Self {
        Self::new(&PALETTE_NORMAL)
    }
}

/// 31-multiplier polynomial hash over UTF-16 code units.
///
/// Stable across runs and platforms, unlike `std`'s randomly seeded hasher.
pub fn label_hash(label: &str) -> u32 {
    label
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
        .unsigned_abs()
}

impl ColoringStrategy for LabelHashColoring {
    fn color_for(&self, _key: &ColorKey, label: &str) -> Color {
        if self.palette.is_empty() {
            return Color::new(DISABLED);
        }
        let idx = label_hash(label) as usize % self.palette.len();
        self.palette[idx].clone()
    }
}

/// Explicit colors for selected keys, falling back to another strategy.
///
/// Used to color suggested or alternative links independently of the
/// annotation they hang off.
pub struct KeyedColoring<S> {
    colors: HashMap<ColorKey, Color>,
    fallback: S,
}

impl<S: ColoringStrategy> KeyedColoring<S> {
    pub fn new(fallback: S) -> Self {
        Self {
            colors: HashMap::new(),
            fallback,
        }
    }

    pub fn with_color(mut self, key: ColorKey, color: Color) -> Self {
        self.insert(key, color);
        self
    }

    pub fn insert(&mut self, key: ColorKey, color: Color) {
        self.colors.insert(key, color);
    }
}

impl<S: ColoringStrategy> ColoringStrategy for KeyedColoring<S> {
    fn color_for(&self, key: &ColorKey, label: &str) -> Color {
        match self.colors.get(key) {
            Some(color) => color.clone(),
            None => self.fallback.color_for(key, label),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for KeyedColoring<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedColoring")
            .field("keyed_colors", &self.colors.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Named palettes for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Pastel,
    Normal,
}

impl Palette {
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Palette::Pastel => &PALETTE_PASTEL,
            Palette::Normal => &PALETTE_NORMAL,
        }
    }
}

/// Configuration-facing choice of strategy for a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ColoringPolicy {
    Static { color: Color },
    LabelHash { palette: Palette },
}

impl Default for ColoringPolicy {
    fn default() -> Self {
        ColoringPolicy::LabelHash {
            palette: Palette::Pastel,
        }
    }
}

impl ColoringPolicy {
    pub fn build(&self) -> Box<dyn ColoringStrategy> {
        match self {
            ColoringPolicy::Static { color } => Box::new(StaticColoring(color.clone())),
            ColoringPolicy::LabelHash { palette } => Box::new(LabelHashColoring::new(palette.colors())),
        }
    }
}
