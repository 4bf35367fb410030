use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{ConflictPolicy, EasingFunction, PathType};
use crate::view::ViewAngle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
/// Defaults applied to camera flights built from options.
pub struct TransitionOptions {
    /// Flight duration in milliseconds. Zero snaps.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 10_000))]
    pub duration_ms: u64,
    /// Flight path shape.
    #[schemars(title = "Path")]
    pub path: PathType,
    /// Progress easing curve.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Behavior when a request overlaps a running transition.
    #[schemars(title = "On Conflict")]
    pub conflict: ConflictPolicy,
    /// Default camera placement angle.
    #[schemars(title = "View From")]
    pub view_from: ViewAngle,
    /// Default aim angle.
    #[schemars(title = "Look At")]
    pub look_at: ViewAngle,
    /// Distance factor; zero or negative derives it from the field of view.
    #[schemars(title = "Distance Factor", range(min = 0.0, max = 10.0), extend("step" = 0.05))]
    pub distance_factor: f32,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            path: PathType::Linear,
            easing: EasingFunction::DEFAULT,
            conflict: ConflictPolicy::Replace,
            view_from: ViewAngle::Front,
            look_at: ViewAngle::Center,
            distance_factor: 0.0,
        }
    }
}
