//! User input forwarded to the orbit controller.

use glam::Vec2;

use super::Cameraman;

impl Cameraman {
    /// Orbit around the controller target by a pointer delta.
    ///
    /// Ignored while a transition is running. Returns whether the camera
    /// moved (a redraw is requested if so).
    pub fn orbit(&mut self, delta: Vec2) -> bool {
        let moved = self.controls.rotate(&mut self.camera, delta);
        self.after_input(moved)
    }

    /// Pan camera and target in the view plane.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        let moved = self.controls.pan(&mut self.camera, delta);
        self.after_input(moved)
    }

    /// Dolly toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let moved = self.controls.zoom(&mut self.camera, delta);
        self.after_input(moved)
    }

    /// Viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        (self.redraw)();
    }

    fn after_input(&mut self, moved: bool) -> bool {
        if moved {
            (self.redraw)();
        }
        moved
    }
}
