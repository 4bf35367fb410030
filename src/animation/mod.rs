//! Camera transition machinery: requests, easing, flight paths, timing, and
//! the completion signal handed back to callers.

mod completion;
pub mod easing;
pub mod path;
mod runner;
pub mod transition;

pub(crate) use completion::{channel, Completer};
pub use completion::{
    CancelToken, TransitionHandle, TransitionId, TransitionOutcome,
};
pub use easing::EasingFunction;
pub use path::{CameraPath, PathType};
pub use runner::{TransitionFrame, TransitionReport, TransitionState};
pub use transition::{
    auto_distance_factor, ConflictPolicy, LookAtRequest, TransitionPhase,
};
