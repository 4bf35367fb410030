//! Transition runner: timing and sampling of a single camera flight.

use glam::Vec3;
use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use super::path::CameraPath;
use crate::camera::CameraPose;

/// One sampled step of a running transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Camera position for this step.
    pub position: Vec3,
    /// Point the camera (and orbit controller) should aim at.
    pub look_at: Vec3,
    /// Raw progress in `[0, 1]`.
    pub progress: f32,
    /// Progress after easing.
    pub eased: f32,
}

impl TransitionFrame {
    /// Whether this is the final step.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Summary of a finished (or cancelled) transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionReport {
    /// Camera pose when the transition started.
    pub from: CameraPose,
    /// Camera pose when the transition ended.
    pub to: CameraPose,
    /// Number of animation steps applied.
    pub steps: u32,
}

/// State owned by one in-flight transition.
///
/// Holds the start pose, the end look-at target, the flight path (whose end
/// is the final camera position), and timing. Progress is derived from the
/// timestamp passed to [`advance`](Self::advance), so steps are monotonic as
/// long as callers pass non-decreasing instants.
#[derive(Debug, Clone)]
pub struct TransitionState {
    start_time: Instant,
    duration: Duration,
    easing: EasingFunction,
    path: CameraPath,
    start_pose: CameraPose,
    look_at_start: Vec3,
    look_at_end: Vec3,
    steps: u32,
}

impl TransitionState {
    /// Start a transition at `start_time`.
    #[must_use]
    pub fn new(
        start_time: Instant,
        duration: Duration,
        easing: EasingFunction,
        path: CameraPath,
        start_pose: CameraPose,
        look_at_end: Vec3,
    ) -> Self {
        Self {
            start_time,
            duration,
            easing,
            path,
            start_pose,
            look_at_start: start_pose.target,
            look_at_end,
            steps: 0,
        }
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Flight path.
    #[must_use]
    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    /// Final look-at target.
    #[must_use]
    pub fn look_at_end(&self) -> Vec3 {
        self.look_at_end
    }

    /// Steps applied so far.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Normalized progress (0.0 to 1.0). Zero-length transitions are
    /// always complete.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Sample the transition at `now` without counting a step.
    #[must_use]
    pub fn sample(&self, now: Instant) -> TransitionFrame {
        let progress = self.progress(now);
        let eased = self.easing.evaluate(progress);
        let look_at = if progress >= 1.0 {
            self.look_at_end
        } else {
            self.look_at_start.lerp(self.look_at_end, eased)
        };
        let position = if progress >= 1.0 {
            self.path.end()
        } else {
            self.path.sample(eased)
        };
        TransitionFrame {
            position,
            look_at,
            progress,
            eased,
        }
    }

    /// Sample the transition at `now` and count it as an applied step.
    pub fn advance(&mut self, now: Instant) -> TransitionFrame {
        self.steps += 1;
        self.sample(now)
    }

    /// Report ending at `end_pose`.
    #[must_use]
    pub fn report(&self, end_pose: CameraPose) -> TransitionReport {
        TransitionReport {
            from: self.start_pose,
            to: end_pose,
            steps: self.steps,
        }
    }
}
