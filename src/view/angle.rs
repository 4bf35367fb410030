use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameramanError;

/// Trig factors smaller than this are snapped to zero.
const TRIG_EPSILON: f32 = 1e-6;

/// Named direction from which an object is viewed (or at which the camera
/// aims). Index order is stable and matches [`ViewAngle::ALL`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ViewAngle {
    /// Bounding box center.
    #[default]
    Center,
    Front,
    Top,
    Bottom,
    Rear,
    Left,
    Right,
    FrontTop,
    FrontLeft,
    FrontRight,
    FrontBottom,
    FrontTopLeft,
    FrontTopRight,
    FrontBottomLeft,
    FrontBottomRight,
    RearTop,
    RearLeft,
    RearRight,
    RearBottom,
    RearTopLeft,
    RearTopRight,
    RearBottomLeft,
    RearBottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

/// Angle pair selecting a point on an object's bounding sphere.
///
/// `a` sweeps around the vertical axis (0 = +x, π/2 = +z toward the viewer),
/// `b` is the elevation above the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    /// Azimuth in radians.
    pub a: f32,
    /// Elevation in radians.
    pub b: f32,
}

impl Angles {
    const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    /// Per-axis factors `(cos a·cos b, sin b, sin a·cos b)`, with
    /// floating-point dust around the axes snapped to zero.
    #[must_use]
    pub fn direction_factors(&self) -> Vec3 {
        let (sin_a, cos_a) = self.a.sin_cos();
        let (sin_b, cos_b) = self.b.sin_cos();
        let snap = |v: f32| if v.abs() < TRIG_EPSILON { 0.0 } else { v };
        Vec3::new(snap(cos_a * cos_b), snap(sin_b), snap(sin_a * cos_b))
    }
}

const FRAC_3PI_4: f32 = PI * 0.75;

/// Static angle table, indexed by discriminant. `Center` has no entry.
static VIEW_ANGLES: [Option<Angles>; ViewAngle::COUNT] = [
    None,
    Some(Angles::new(FRAC_PI_2, 0.0)),
    Some(Angles::new(FRAC_PI_2, FRAC_PI_2)),
    Some(Angles::new(FRAC_PI_2, -FRAC_PI_2)),
    Some(Angles::new(-FRAC_PI_2, 0.0)),
    Some(Angles::new(0.0, 0.0)),
    Some(Angles::new(PI, 0.0)),
    // front diagonals
    Some(Angles::new(FRAC_PI_2, FRAC_PI_4)),
    Some(Angles::new(FRAC_PI_4, 0.0)),
    Some(Angles::new(FRAC_3PI_4, 0.0)),
    Some(Angles::new(FRAC_PI_2, -FRAC_PI_4)),
    Some(Angles::new(FRAC_PI_4, FRAC_PI_4)),
    Some(Angles::new(FRAC_3PI_4, FRAC_PI_4)),
    Some(Angles::new(FRAC_PI_4, -FRAC_PI_4)),
    Some(Angles::new(FRAC_3PI_4, -FRAC_PI_4)),
    // rear diagonals
    Some(Angles::new(-FRAC_PI_2, FRAC_PI_4)),
    Some(Angles::new(-FRAC_PI_4, 0.0)),
    Some(Angles::new(-FRAC_3PI_4, 0.0)),
    Some(Angles::new(-FRAC_PI_2, -FRAC_PI_4)),
    Some(Angles::new(-FRAC_PI_4, FRAC_PI_4)),
    Some(Angles::new(-FRAC_3PI_4, FRAC_PI_4)),
    Some(Angles::new(-FRAC_PI_4, -FRAC_PI_4)),
    Some(Angles::new(-FRAC_3PI_4, -FRAC_PI_4)),
    // side diagonals
    Some(Angles::new(0.0, FRAC_PI_4)),
    Some(Angles::new(0.0, -FRAC_PI_4)),
    Some(Angles::new(PI, FRAC_PI_4)),
    Some(Angles::new(PI, -FRAC_PI_4)),
];

impl ViewAngle {
    /// Number of view angles.
    pub const COUNT: usize = 27;

    /// Every angle in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Center,
        Self::Front,
        Self::Top,
        Self::Bottom,
        Self::Rear,
        Self::Left,
        Self::Right,
        Self::FrontTop,
        Self::FrontLeft,
        Self::FrontRight,
        Self::FrontBottom,
        Self::FrontTopLeft,
        Self::FrontTopRight,
        Self::FrontBottomLeft,
        Self::FrontBottomRight,
        Self::RearTop,
        Self::RearLeft,
        Self::RearRight,
        Self::RearBottom,
        Self::RearTopLeft,
        Self::RearTopRight,
        Self::RearBottomLeft,
        Self::RearBottomRight,
        Self::LeftTop,
        Self::LeftBottom,
        Self::RightTop,
        Self::RightBottom,
    ];

    /// Stable numeric index (0 for `center`).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Angle pair for this view, `None` for `center`.
    #[must_use]
    pub fn angles(self) -> Option<Angles> {
        VIEW_ANGLES.get(self.index()).copied().flatten()
    }

    /// snake_case name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Front => "front",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Rear => "rear",
            Self::Left => "left",
            Self::Right => "right",
            Self::FrontTop => "front_top",
            Self::FrontLeft => "front_left",
            Self::FrontRight => "front_right",
            Self::FrontBottom => "front_bottom",
            Self::FrontTopLeft => "front_top_left",
            Self::FrontTopRight => "front_top_right",
            Self::FrontBottomLeft => "front_bottom_left",
            Self::FrontBottomRight => "front_bottom_right",
            Self::RearTop => "rear_top",
            Self::RearLeft => "rear_left",
            Self::RearRight => "rear_right",
            Self::RearBottom => "rear_bottom",
            Self::RearTopLeft => "rear_top_left",
            Self::RearTopRight => "rear_top_right",
            Self::RearBottomLeft => "rear_bottom_left",
            Self::RearBottomRight => "rear_bottom_right",
            Self::LeftTop => "left_top",
            Self::LeftBottom => "left_bottom",
            Self::RightTop => "right_top",
            Self::RightBottom => "right_bottom",
        }
    }

    /// Angle at `index`, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Angle at `index`, falling back to `center` with a warning.
    #[must_use]
    pub fn from_index_or_center(index: i64) -> Self {
        let angle = usize::try_from(index).ok().and_then(Self::from_index);
        angle.unwrap_or_else(|| {
            log::warn!(
                "Invalid view angle index {index}. Falling back to \"center\""
            );
            Self::Center
        })
    }

    /// Parse a name (or a numeric index), falling back to `center` with a
    /// warning.
    #[must_use]
    pub fn parse_or_center(input: &str) -> Self {
        input.parse().unwrap_or_else(|_| {
            log::warn!(
                "Invalid view angle \"{input}\". Falling back to \"center\""
            );
            Self::Center
        })
    }
}

impl fmt::Display for ViewAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewAngle {
    type Err = CameramanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| {
                CameramanError::UnknownViewAngle(trimmed.to_owned())
            });
        }
        let normalized = trimmed.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|angle| angle.name() == normalized)
            .ok_or_else(|| CameramanError::UnknownViewAngle(trimmed.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total_except_center() {
        assert!(ViewAngle::Center.angles().is_none());
        for angle in &ViewAngle::ALL[1..] {
            assert!(angle.angles().is_some(), "{angle} has no angles");
        }
    }

    #[test]
    fn all_is_in_index_order() {
        for (i, angle) in ViewAngle::ALL.iter().enumerate() {
            assert_eq!(angle.index(), i);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for angle in ViewAngle::ALL {
            assert_eq!(angle.name().parse::<ViewAngle>().unwrap(), angle);
        }
        assert_eq!(
            "Front-Top-Left".parse::<ViewAngle>().unwrap(),
            ViewAngle::FrontTopLeft
        );
    }

    #[test]
    fn numeric_input_selects_by_index() {
        assert_eq!("1".parse::<ViewAngle>().unwrap(), ViewAngle::Front);
        assert!("27".parse::<ViewAngle>().is_err());
        assert_eq!(ViewAngle::from_index_or_center(26), ViewAngle::RightBottom);
    }

    #[test]
    fn unknown_input_degrades_to_center() {
        assert_eq!(ViewAngle::parse_or_center("sideways"), ViewAngle::Center);
        assert_eq!(ViewAngle::from_index_or_center(-1), ViewAngle::Center);
        assert_eq!(ViewAngle::from_index_or_center(99), ViewAngle::Center);
        assert!(matches!(
            "sideways".parse::<ViewAngle>(),
            Err(CameramanError::UnknownViewAngle(s)) if s == "sideways"
        ));
    }

    #[test]
    fn front_points_toward_viewer() {
        let f = ViewAngle::Front.angles().unwrap().direction_factors();
        assert_eq!(f, Vec3::Z);
        let top = ViewAngle::Top.angles().unwrap().direction_factors();
        assert_eq!(top, Vec3::Y);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ViewAngle::FrontBottomRight).unwrap();
        assert_eq!(json, "\"front_bottom_right\"");
    }
}
