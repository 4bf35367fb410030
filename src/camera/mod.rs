//! Perspective camera and the interactive orbit controller that moves it.

/// Core camera struct and pose snapshot.
pub mod core;
/// Orbit controller driven by pointer deltas.
pub mod orbit;

pub use self::core::{Camera, CameraPose};
pub use self::orbit::OrbitControls;
