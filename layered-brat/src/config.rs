//! Render preferences.
//!
//! Preferences are plain TOML:
//!
//! ```toml
//! window_size = 5
//!
//! [default_coloring]
//! strategy = "label_hash"
//! palette = "normal"
//!
//! [coloring.Predicate]
//! strategy = "static"
//! color = "#fb8072"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ColoringPolicy, RenderError, RenderResult};

/// Default number of sentences per page.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Per-user rendering preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderPreferences {
    /// Sentences per page
    pub window_size: usize,
    /// Coloring for layers without an entry in `coloring`
    pub default_coloring: ColoringPolicy,
    /// Coloring per layer type name
    pub coloring: BTreeMap<String, ColoringPolicy>,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            default_coloring: ColoringPolicy::default(),
            coloring: BTreeMap::new(),
        }
    }
}

impl RenderPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> RenderResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| RenderError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_toml_str(s: &str) -> RenderResult<Self> {
        Self::parse(s, "<string>")
    }

    fn parse(s: &str, origin: &str) -> RenderResult<Self> {
        let preferences: Self = toml::from_str(s).map_err(|e| RenderError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        if preferences.window_size == 0 {
            return Err(RenderError::Config {
                path: origin.to_string(),
                message: "window_size must be at least 1".to_string(),
            });
        }
        Ok(preferences)
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_default_policy(mut self, policy: ColoringPolicy) -> Self {
        self.default_coloring = policy;
        self
    }

    pub fn with_layer_policy(mut self, type_name: &str, policy: ColoringPolicy) -> Self {
        self.coloring.insert(type_name.to_string(), policy);
        self
    }

    /// Coloring policy for a layer.
    pub fn policy_for(&self, type_name: &str) -> &ColoringPolicy {
        self.coloring.get(type_name).unwrap_or(&self.default_coloring)
    }
}
