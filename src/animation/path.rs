//! Camera flight paths.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::Aabb;

/// Shape of a camera flight.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    /// Straight line from start to end.
    #[default]
    Linear,
    /// Quadratic Bézier bending around the framed object.
    Curved,
}

/// Sampled flight path between two camera positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPath {
    /// Straight segment.
    Linear {
        /// Position at t = 0.
        start: Vec3,
        /// Position at t = 1.
        end: Vec3,
    },
    /// Quadratic Bézier curve.
    Curved {
        /// Position at t = 0.
        start: Vec3,
        /// Bézier control point.
        control: Vec3,
        /// Position at t = 1.
        end: Vec3,
    },
}

impl CameraPath {
    /// Build a path of the given type. Curved paths place their control
    /// point outside `avoid` when the preferred side would enter it.
    #[must_use]
    pub fn new(
        path_type: PathType,
        start: Vec3,
        end: Vec3,
        avoid: &Aabb,
        up: Vec3,
    ) -> Self {
        match path_type {
            PathType::Linear => Self::Linear { start, end },
            PathType::Curved => Self::Curved {
                start,
                control: curved_control_point(start, end, avoid, up),
                end,
            },
        }
    }

    /// Position at t = 0.
    #[must_use]
    pub fn start(&self) -> Vec3 {
        match *self {
            Self::Linear { start, .. } | Self::Curved { start, .. } => start,
        }
    }

    /// Position at t = 1.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        match *self {
            Self::Linear { end, .. } | Self::Curved { end, .. } => end,
        }
    }

    /// Bézier control point, for curved paths.
    #[must_use]
    pub fn control_point(&self) -> Option<Vec3> {
        match *self {
            Self::Linear { .. } => None,
            Self::Curved { control, .. } => Some(control),
        }
    }

    /// Position at `t`. The endpoints are returned exactly.
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }
        match *self {
            Self::Linear { start, end } => start.lerp(end, t),
            Self::Curved {
                start,
                control,
                end,
            } => {
                let omt = 1.0 - t;
                start * (omt * omt) + control * (2.0 * omt * t) + end * (t * t)
            }
        }
    }
}

/// Control point for a curved flight from `start` to `end`.
///
/// The start-to-midpoint vector is turned 90° about `up` and added to the
/// midpoint. If that lands inside `avoid`, the opposite side (−90°) is used.
#[must_use]
pub fn curved_control_point(
    start: Vec3,
    end: Vec3,
    avoid: &Aabb,
    up: Vec3,
) -> Vec3 {
    let axis = up.try_normalize().unwrap_or(Vec3::Y);
    let mid = (start + end) * 0.5;
    let half = mid - start;

    let preferred = mid + Quat::from_axis_angle(axis, FRAC_PI_2) * half;
    if !avoid.contains_point(preferred) {
        return preferred;
    }
    mid + Quat::from_axis_angle(axis, -FRAC_PI_2) * half
}
