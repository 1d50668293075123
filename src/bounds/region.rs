use std::fmt;

use glam::Vec3;

use super::footprint::Footprint;

/// Horizontal axis of the pan fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionAxis {
    /// World X.
    X,
    /// World Z.
    Z,
}

/// Recoverable problem found while deriving a [`ConstraintRegion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionWarning {
    /// The inset bounds crossed on `axis` (the margin exceeded half the
    /// footprint); both bounds were collapsed to the axis midpoint.
    Inverted {
        /// Offending axis.
        axis: RegionAxis,
        /// Lower bound before collapsing.
        min: f32,
        /// Upper bound before collapsing.
        max: f32,
    },
}

impl fmt::Display for RegionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { axis, min, max } => write!(
                f,
                "pan region inverted on {axis:?} (min {min:.3} > max \
                 {max:.3}), collapsed to midpoint {:.3}",
                (min + max) * 0.5
            ),
        }
    }
}

/// Rectangle in the ground plane the camera target and eye are clamped to.
///
/// Always satisfies `min_x <= max_x` and `min_z <= max_z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintRegion {
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
}

impl ConstraintRegion {
    /// Build a region, collapsing any inverted axis to its midpoint.
    #[must_use]
    pub fn new(
        min_x: f32,
        max_x: f32,
        min_z: f32,
        max_z: f32,
    ) -> (Self, Vec<RegionWarning>) {
        let mut warnings = Vec::new();
        let (min_x, max_x) =
            resolve_axis(RegionAxis::X, min_x, max_x, &mut warnings);
        let (min_z, max_z) =
            resolve_axis(RegionAxis::Z, min_z, max_z, &mut warnings);
        (
            Self {
                min_x,
                max_x,
                min_z,
                max_z,
            },
            warnings,
        )
    }

    /// Inset `footprint` by `offset_x` on both X edges and `offset_z` on
    /// both Z edges.
    #[must_use]
    pub fn from_footprint(
        footprint: &Footprint,
        offset_x: f32,
        offset_z: f32,
    ) -> (Self, Vec<RegionWarning>) {
        Self::new(
            footprint.min.x + offset_x,
            footprint.max.x - offset_x,
            footprint.min.z + offset_z,
            footprint.max.z - offset_z,
        )
    }

    /// Lower X bound.
    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    /// Upper X bound.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Lower Z bound.
    #[must_use]
    pub fn min_z(&self) -> f32 {
        self.min_z
    }

    /// Upper Z bound.
    #[must_use]
    pub fn max_z(&self) -> f32 {
        self.max_z
    }

    /// Clamp the horizontal coordinates of `point`; `y` passes through.
    ///
    /// Never panics, even on NaN input.
    #[must_use]
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.max(self.min_x).min(self.max_x),
            point.y,
            point.z.max(self.min_z).min(self.max_z),
        )
    }

    /// Whether the horizontal coordinates of `point` lie inside.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&point.x)
            && (self.min_z..=self.max_z).contains(&point.z)
    }
}

fn resolve_axis(
    axis: RegionAxis,
    min: f32,
    max: f32,
    warnings: &mut Vec<RegionWarning>,
) -> (f32, f32) {
    if min <= max {
        return (min, max);
    }
    warnings.push(RegionWarning::Inverted { axis, min, max });
    let mid = (min + max) * 0.5;
    (mid, mid)
}

/// Eye-to-target distance band, proportional to the footprint size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Closest allowed eye distance.
    pub min_distance: f32,
    /// Farthest allowed eye distance.
    pub max_distance: f32,
}

impl ZoomLimits {
    /// `max_side * min_factor ..= max_side * max_factor`.
    #[must_use]
    pub fn from_footprint(
        footprint: &Footprint,
        min_factor: f32,
        max_factor: f32,
    ) -> Self {
        let max_side = footprint.max_side();
        Self {
            min_distance: max_side * min_factor,
            max_distance: max_side * max_factor,
        }
    }
}
