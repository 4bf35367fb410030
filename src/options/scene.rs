use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Scene graph limits.
pub struct SceneOptions {
    /// Maximum number of parent links walked when looking for a scene root.
    #[schemars(skip)]
    pub max_depth: usize,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
