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

//! Bounded map-style camera for an interactive seabed viewport.
//!
//! The crate keeps a perspective camera hovering over a loaded ground
//! environment: a rectangular pan fence is derived from the ground's
//! world-space footprint and the camera's visible window, and every
//! control update clamps the camera target and position into it before
//! the orbit/pan controller applies damping.
//!
//! # Key entry points
//!
//! - [`bounds::BoundsConstraint`] - derives and enforces the pan fence and
//!   zoom band
//! - [`engine::ViewEngine`] - the per-session context object owned by the
//!   frame loop
//! - [`camera::MapControls`] - default orbit/pan controller behind the
//!   [`camera::ControlState`] seam
//! - [`options::Options`] - runtime configuration (camera, controls,
//!   bounds, environment presets)
//!
//! # Frame ordering
//!
//! Within one frame the engine runs: clamp target and eye, then the
//! controller's damped update, then the host renders. The clamp never runs
//! before the ground load has resolved.

pub mod bounds;
pub mod camera;
pub mod engine;
pub mod error;
pub mod ground;
pub mod input;
pub mod options;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use bounds::{
    BoundsConstraint, ConstraintRegion, Footprint, RegionWarning, ZoomLimits,
};
pub use engine::{command::ViewCommand, ConstraintState, ViewEngine};
pub use error::ViewerError;
pub use ground::{GroundModel, GroundPart};
pub use input::{InputEvent, InputProcessor, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
