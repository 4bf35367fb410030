//! Named view angles and the anchor point solver.

mod anchor;
mod angle;

pub use anchor::{bounding_volume, view_point, BoundingVolume};
pub use angle::{Angles, ViewAngle};
