use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Shared redraw bookkeeping between the scheduler and its callbacks.
#[derive(Debug, Default)]
struct RedrawState {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

/// Per-frame redraw coalescing with FPS estimation and optional frame
/// limiting.
///
/// Hand [`redraw_callback`](Self::redraw_callback) to anything that needs to
/// request a render; any number of requests between two
/// [`take_redraw`](Self::take_redraw) calls produce a single render.
#[derive(Debug)]
pub struct FrameScheduler {
    redraw: Rc<RedrawState>,
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FrameScheduler {
    /// Create a scheduler with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            redraw: Rc::default(),
            target_fps,
            min_frame_duration,
            last_frame: None,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
            frames: 0,
        }
    }

    /// Callback that marks a redraw as pending.
    #[must_use]
    pub fn redraw_callback(&self) -> impl FnMut() + 'static {
        let state = Rc::clone(&self.redraw);
        move || {
            state.pending.set(true);
            state.requests.set(state.requests.get() + 1);
        }
    }

    /// Whether a redraw is pending.
    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.redraw.pending.get()
    }

    /// Consume the pending redraw, if any. Returns true when the host should
    /// render this frame.
    pub fn take_redraw(&self) -> bool {
        self.redraw.pending.replace(false)
    }

    /// Total redraw requests seen (before coalescing).
    #[must_use]
    pub fn redraw_requests(&self) -> u64 {
        self.redraw.requests.get()
    }

    /// Whether enough time has passed since the last frame to render.
    #[must_use]
    pub fn should_render(&self, now: Instant) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.is_none_or(|last| {
            now.saturating_duration_since(last) >= self.min_frame_duration
        })
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self, now: Instant) {
        self.frames += 1;
        let Some(last) = self.last_frame.replace(now) else {
            return;
        };

        // Calculate instantaneous FPS
        let frame_time = now.saturating_duration_since(last).as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce_into_one_redraw() {
        let scheduler = FrameScheduler::new(0);
        let mut redraw = scheduler.redraw_callback();
        redraw();
        redraw();
        redraw();
        assert_eq!(scheduler.redraw_requests(), 3);
        assert!(scheduler.take_redraw());
        assert!(!scheduler.take_redraw());
    }

    #[test]
    fn frame_limit_gates_rendering() {
        let mut scheduler = FrameScheduler::new(10);
        let t0 = Instant::now();
        assert!(scheduler.should_render(t0));
        scheduler.end_frame(t0);
        assert!(!scheduler.should_render(t0 + Duration::from_millis(50)));
        assert!(scheduler.should_render(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn fps_tracks_frame_interval() {
        let mut scheduler = FrameScheduler::new(0);
        let mut now = Instant::now();
        for _ in 0..400 {
            scheduler.end_frame(now);
            now += Duration::from_millis(20);
        }
        assert_eq!(scheduler.frames(), 400);
        assert!((scheduler.fps() - 50.0).abs() < 1.0);
    }
}
