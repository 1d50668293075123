//! Camera state and controllers.
//!
//! Provides the perspective/orthographic camera, the [`ControlState`] seam
//! the bounds constraint clamps through, and a map-style orbit/pan
//! controller implementing it.

/// Map-style orbit/pan controller with damping and distance limits.
pub mod controller;
/// Core camera struct, visible-window math, and GPU uniform type.
pub mod core;
/// Trait implemented by anything that owns a camera target and update step.
pub mod control_state;

pub use control_state::ControlState;
pub use controller::MapControls;
pub use core::{Camera, CameraUniform, Projection, VisibleWindow};
