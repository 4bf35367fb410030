//! Host-side render scheduling: redraw coalescing and frame timing.

mod scheduler;

pub use scheduler::FrameScheduler;
