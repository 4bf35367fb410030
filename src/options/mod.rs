//! Centralized camera/transition options with TOML preset support.
//!
//! Options serialize to/from TOML so a viewer can ship presets (e.g. a
//! slower curved flight for showroom mode) without code changes.

mod camera;
mod scene;
mod transition;

use std::path::Path;

pub use camera::CameraOptions;
pub use scene::SceneOptions;
pub use transition::TransitionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameramanError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[transition]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Default transition parameters.
    pub transition: TransitionOptions,
    /// Scene graph limits.
    #[schemars(skip)]
    pub scene: SceneOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CameramanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, CameramanError> {
        toml::from_str(content)
            .map_err(|e| CameramanError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CameramanError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CameramanError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
