use glam::Vec3;

use crate::error::ViewerError;

/// Axis-aligned world-space bounds of the ground object.
///
/// Only the horizontal extent (X and Z) drives the pan fence; Y is carried
/// along so the camera target can sit at the ground's mid height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Footprint {
    /// Box spanning two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, p| {
            Some(acc.map_or(Self { min: p, max: p }, |fp| Self {
                min: fp.min.min(p),
                max: fp.max.max(p),
            }))
        })
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Longest horizontal side, `max(size.x, size.z)`.
    #[must_use]
    pub fn max_side(&self) -> f32 {
        let size = self.size();
        size.x.max(size.z)
    }

    /// Same box with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_corners(self.min * factor, self.max * factor)
    }

    /// Reject boxes with no horizontal area or non-finite corners.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let size = self.size();
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || size.x <= 0.0 || size.z <= 0.0 {
            return Err(ViewerError::DegenerateFootprint {
                size_x: size.x,
                size_z: size.z,
            });
        }
        Ok(())
    }
}
