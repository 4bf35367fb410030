use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance from the origin the camera starts at.
    #[schemars(skip)]
    pub initial_distance: f32,
    /// Orbit rotation in radians per pointer pixel.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan distance per pointer pixel.
    #[schemars(title = "Pan Speed", range(min = 0.001, max = 1.0), extend("step" = 0.001))]
    pub pan_speed: f32,
    /// Fraction of the orbit distance covered per zoom step.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest the orbit controller may dolly to its target.
    #[schemars(title = "Min Distance", range(min = 0.0))]
    pub min_distance: f32,
    /// Farthest the orbit controller may dolly from its target.
    #[schemars(title = "Max Distance", range(min = 0.0))]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 10_000.0,
            initial_distance: 10.0,
            rotate_speed: 0.01,
            pan_speed: 0.05,
            zoom_speed: 0.1,
            min_distance: 0.1,
            max_distance: 5_000.0,
        }
    }
}
