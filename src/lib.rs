// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera framing and transition engine for 3D scene viewers.
//!
//! Given a node in a [`scene::SceneGraph`], the anchor solver computes the
//! bounding sphere of the node's framed geometry and picks one of 27 named
//! points on it ([`view::ViewAngle`]). The [`cameraman::Cameraman`] owns the
//! camera and its orbit controller and flies the camera between such points,
//! suspending user control for the duration of the flight.
//!
//! # Key entry points
//!
//! - [`cameraman::Cameraman`] - the transition animator
//! - [`view::view_point`] - anchor solver for a node and angle
//! - [`scene::SceneGraph`] - arena scene graph with world transforms
//! - [`options::Options`] - runtime configuration (camera, transitions)
//!
//! # Driving transitions
//!
//! The engine never reads the clock or spawns threads. The host calls
//! [`cameraman::Cameraman::tick`] once per frame with the current
//! [`web_time::Instant`]; redraw requests go through a host callback such as
//! the one handed out by [`render::FrameScheduler`].

pub mod animation;
pub mod camera;
pub mod cameraman;
pub mod error;
pub mod options;
pub mod render;
pub mod scene;
pub mod view;

pub use cameraman::Cameraman;
pub use error::CameramanError;
