use glam::{Mat3, Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, look-at target, and
/// projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    orientation: Quat,
    projection: Mat4,
}

/// Snapshot of where a camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// World rotation (camera looks down its local -Z).
    pub orientation: Quat,
    /// Look-at point.
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 1.0)
    }
}

impl Camera {
    /// Camera at `+Z` looking at the origin, configured from `options`.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, options.initial_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            orientation: Quat::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.look_at(Vec3::ZERO);
        camera.update_projection_matrix();
        camera
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy.to_radians()
    }

    /// Current world rotation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.eye,
            orientation: self.orientation,
            target: self.target,
        }
    }

    /// Aim the camera at `point` without moving it.
    ///
    /// When `point` coincides with the eye the orientation is kept. Looking
    /// straight along `up` picks a stable substitute up vector instead of
    /// producing NaNs.
    pub fn look_at(&mut self, point: Vec3) {
        self.target = point;
        let Some(forward) = (point - self.eye).try_normalize() else {
            return;
        };
        self.orientation = look_rotation(forward, self.up);
    }

    /// Recompute the cached projection matrix after fov/aspect/clip changes.
    pub fn update_projection_matrix(&mut self) {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        self.projection = Mat4::perspective_rh(
            self.fovy_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Change the aspect ratio and refresh the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
            self.update_projection_matrix();
        }
    }
}

/// Rotation whose local -Z points along `forward` with +Y as close to `up`
/// as possible.
fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let right = forward
        .cross(up)
        .try_normalize()
        .unwrap_or_else(|| forward.any_orthonormal_vector());
    let true_up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)).normalize()
}
