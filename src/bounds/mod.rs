//! Pan fence and zoom band derived from the ground footprint.
//!
//! [`BoundsConstraint::initialize`] measures the loaded ground, sets the
//! controller's distance limits, and derives a [`ConstraintRegion`] inset
//! from the footprint edges by a fraction of the camera's visible window.
//! [`BoundsConstraint::step`] is the per-frame clamp-then-delegate update
//! the frame loop calls instead of the bare controller update.

/// The constraint controller and its per-frame step.
pub mod constraint;
/// World-space ground footprint.
pub mod footprint;
/// Clamp rectangle, zoom band, and inversion warnings.
pub mod region;

pub use constraint::BoundsConstraint;
pub use footprint::Footprint;
pub use region::{ConstraintRegion, RegionAxis, RegionWarning, ZoomLimits};
