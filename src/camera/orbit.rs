use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Minimum angle (radians) kept between the eye offset and the up axis so
/// vertical orbiting cannot flip over the poles.
const POLE_MARGIN: f32 = 1e-3;

/// Interactive orbit controller.
///
/// Rotates, pans and zooms a [`Camera`] around `target`. While `enabled` is
/// false every input is ignored; programmatic transitions flip it off so
/// user input cannot fight the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Whether user input is applied.
    pub enabled: bool,
    /// Orbit pivot.
    pub target: Vec3,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

impl OrbitControls {
    /// Enabled controller orbiting the origin.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
        }
    }

    /// Orbit the camera around the target by a pointer delta (pixels).
    ///
    /// Returns whether the camera moved.
    pub fn rotate(&self, camera: &mut Camera, delta: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        let offset = camera.eye - self.target;
        if offset.length_squared() == 0.0 {
            return false;
        }

        // Horizontal rotation around the world up axis
        let yaw =
            Quat::from_axis_angle(camera.up, -delta.x * self.rotate_speed);
        let mut rotated = yaw * offset;

        // Vertical rotation around the camera's right axis, clamped at the
        // poles
        let right = (yaw * camera.orientation()) * Vec3::X;
        let pitch =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        let pitched = pitch * rotated;
        let polar = pitched.angle_between(camera.up);
        if polar > POLE_MARGIN && polar < std::f32::consts::PI - POLE_MARGIN {
            rotated = pitched;
        }

        camera.eye = self.target + rotated;
        camera.look_at(self.target);
        true
    }

    /// Slide camera and target together in the view plane.
    pub fn pan(&mut self, camera: &mut Camera, delta: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        let right = camera.orientation() * Vec3::X;
        let up = camera.orientation() * Vec3::Y;
        let translation = right * (-delta.x * self.pan_speed)
            + up * (delta.y * self.pan_speed);

        self.target += translation;
        camera.eye += translation;
        camera.look_at(self.target);
        true
    }

    /// Dolly toward (positive `delta`) or away from the target.
    pub fn zoom(&self, camera: &mut Camera, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let offset = camera.eye - self.target;
        let Some(dir) = offset.try_normalize() else {
            return false;
        };
        let distance = (offset.length() * (1.0 - delta * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);

        camera.eye = self.target + dir * distance;
        camera.look_at(self.target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, Camera) {
        let controls = OrbitControls::default();
        let mut camera = Camera::default();
        camera.eye = Vec3::new(0.0, 0.0, 10.0);
        camera.look_at(Vec3::ZERO);
        (controls, camera)
    }

    #[test]
    fn rotate_preserves_distance() {
        let (controls, mut camera) = setup();
        assert!(controls.rotate(&mut camera, Vec2::new(40.0, 15.0)));
        assert!((camera.eye.length() - 10.0).abs() < 1e-4);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut controls, mut camera) = setup();
        controls.enabled = false;
        let before = camera.clone();
        assert!(!controls.rotate(&mut camera, Vec2::new(10.0, 10.0)));
        assert!(!controls.pan(&mut camera, Vec2::new(10.0, 10.0)));
        assert!(!controls.zoom(&mut camera, 1.0));
        assert_eq!(camera, before);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let (mut controls, mut camera) = setup();
        let _ = controls.pan(&mut camera, Vec2::new(10.0, 0.0));
        assert_eq!(camera.target, controls.target);
        assert!((camera.eye - controls.target).abs_diff_eq(
            Vec3::new(0.0, 0.0, 10.0),
            1e-4
        ));
    }

    #[test]
    fn zoom_is_clamped() {
        let (controls, mut camera) = setup();
        for _ in 0..200 {
            let _ = controls.zoom(&mut camera, 1.0);
        }
        let min = CameraOptions::default().min_distance;
        assert!((camera.eye.length() - min).abs() < 1e-4);
    }

    #[test]
    fn vertical_orbit_stops_at_pole() {
        let (controls, mut camera) = setup();
        for _ in 0..100 {
            let _ = controls.rotate(&mut camera, Vec2::new(0.0, 50.0));
        }
        assert!(camera.eye.is_finite());
        assert!(camera.eye.angle_between(Vec3::Y) > 0.0);
        assert!(camera.eye.angle_between(Vec3::NEG_Y) > 0.0);
    }
}
