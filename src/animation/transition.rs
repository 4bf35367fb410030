//! Transition requests: where to fly the camera and how.

use std::f32::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::easing::EasingFunction;
use super::path::PathType;
use crate::options::TransitionOptions;
use crate::scene::NodeId;
use crate::view::ViewAngle;

/// What to do when a new request arrives while a transition is running.
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
pub enum ConflictPolicy {
    /// Cancel the running transition where it is and start the new one.
    #[default]
    Replace,
    /// Start the new transition after the running one resolves.
    Queue,
    /// Refuse the new request with
    /// [`TransitionInProgress`](crate::CameramanError::TransitionInProgress).
    Reject,
}

/// Lifecycle of the Cameraman's transition slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// No transition has run yet.
    #[default]
    Idle,
    /// A transition is in flight; user control is suspended.
    Running,
    /// The last transition reached its end pose.
    Completed,
    /// The last transition was cancelled or superseded.
    Cancelled,
}

/// Camera flight toward a framed view of `target`.
///
/// Defaults: view from `front`, look at `center`, automatic distance,
/// zero duration (snap), linear path, quartic ease-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtRequest {
    /// Node to frame.
    pub target: NodeId,
    /// Angle the camera is placed at.
    pub view_from: ViewAngle,
    /// Angle the camera aims at.
    pub look_at: ViewAngle,
    /// Interpolation factor between the look-at anchor and the view-from
    /// anchor. `None` or non-positive derives it from the field of view.
    pub distance_factor: Option<f32>,
    /// Flight duration. Zero snaps in a single step.
    pub duration: Duration,
    /// Flight path shape.
    pub path: PathType,
    /// Progress remapping.
    pub easing: EasingFunction,
}

impl LookAtRequest {
    /// Request with the default framing of `target`.
    #[must_use]
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            view_from: ViewAngle::Front,
            look_at: ViewAngle::Center,
            distance_factor: None,
            duration: Duration::ZERO,
            path: PathType::Linear,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Request seeded from configured defaults.
    #[must_use]
    pub fn from_options(target: NodeId, options: &TransitionOptions) -> Self {
        Self {
            target,
            view_from: options.view_from,
            look_at: options.look_at,
            distance_factor: Some(options.distance_factor)
                .filter(|f| *f > 0.0),
            duration: Duration::from_millis(options.duration_ms),
            path: options.path,
            easing: options.easing,
        }
    }

    /// Place the camera at `angle`.
    #[must_use]
    pub fn view_from(mut self, angle: ViewAngle) -> Self {
        self.view_from = angle;
        self
    }

    /// Aim the camera at `angle`.
    #[must_use]
    pub fn looking_at(mut self, angle: ViewAngle) -> Self {
        self.look_at = angle;
        self
    }

    /// Override the distance factor. Non-positive restores the automatic
    /// factor.
    #[must_use]
    pub fn distance_factor(mut self, factor: f32) -> Self {
        self.distance_factor = Some(factor).filter(|f| *f > 0.0);
        self
    }

    /// Animate over `duration`.
    #[must_use]
    pub fn over(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Use the given path shape.
    #[must_use]
    pub fn along(mut self, path: PathType) -> Self {
        self.path = path;
        self
    }

    /// Use the given easing curve.
    #[must_use]
    pub fn eased(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Distance factor to apply for a camera with the given vertical fov.
    #[must_use]
    pub fn resolved_distance_factor(&self, fovy_radians: f32) -> f32 {
        match self.distance_factor {
            Some(f) if f > 0.0 => f,
            _ => auto_distance_factor(fovy_radians),
        }
    }
}

/// `tan(π/2 − fov/2)`: pushes the camera out far enough that a sphere of the
/// anchor radius stays in frame.
#[must_use]
pub fn auto_distance_factor(fovy_radians: f32) -> f32 {
    (FRAC_PI_2 - fovy_radians * 0.5).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeKind, SceneGraph};

    fn node() -> NodeId {
        SceneGraph::new().add_detached("n", NodeKind::Group)
    }

    #[test]
    fn test_defaults() {
        let r = LookAtRequest::new(node());
        assert_eq!(r.view_from, ViewAngle::Front);
        assert_eq!(r.look_at, ViewAngle::Center);
        assert_eq!(r.distance_factor, None);
        assert!(r.duration.is_zero());
        assert_eq!(r.path, PathType::Linear);
        assert_eq!(r.easing, EasingFunction::QuarticOut);
    }

    #[test]
    fn test_builder_methods() {
        let r = LookAtRequest::new(node())
            .view_from(ViewAngle::RearTopLeft)
            .looking_at(ViewAngle::Top)
            .distance_factor(2.5)
            .over(Duration::from_millis(750))
            .along(PathType::Curved)
            .eased(EasingFunction::Linear);
        assert_eq!(r.view_from, ViewAngle::RearTopLeft);
        assert_eq!(r.look_at, ViewAngle::Top);
        assert_eq!(r.distance_factor, Some(2.5));
        assert_eq!(r.duration, Duration::from_millis(750));
        assert_eq!(r.path, PathType::Curved);
        assert_eq!(r.easing, EasingFunction::Linear);
    }

    #[test]
    fn test_non_positive_factor_is_auto() {
        let fov = 60.0_f32.to_radians();
        let r = LookAtRequest::new(node()).distance_factor(-1.0);
        assert_eq!(r.distance_factor, None);
        let expected = 3.0_f32.sqrt();
        assert!((r.resolved_distance_factor(fov) - expected).abs() < 1e-5);
        let r = r.distance_factor(1.0);
        assert_eq!(r.resolved_distance_factor(fov), 1.0);
    }

    #[test]
    fn test_from_options() {
        let options = TransitionOptions {
            duration_ms: 400,
            path: PathType::Curved,
            view_from: ViewAngle::Left,
            distance_factor: 0.0,
            ..TransitionOptions::default()
        };
        let r = LookAtRequest::from_options(node(), &options);
        assert_eq!(r.duration, Duration::from_millis(400));
        assert_eq!(r.path, PathType::Curved);
        assert_eq!(r.view_from, ViewAngle::Left);
        assert_eq!(r.distance_factor, None);
    }

    #[test]
    fn test_default_policy_is_replace() {
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Replace);
        assert_eq!(TransitionPhase::default(), TransitionPhase::Idle);
    }
}
