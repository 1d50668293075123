use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit/pan controller behaviour.
pub struct ControlsOptions {
    /// Smooth rotate/pan input over several frames.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of pending input applied per update when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Smallest polar angle from straight down, in radians.
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Largest polar angle; keeps the eye above the horizon.
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_polar_angle: 0.1,
            max_polar_angle: PI * 0.4,
        }
    }
}

impl ControlsOptions {
    /// Check the polar band and damping factor.
    ///
    /// The polar band must satisfy `0 <= min <= max <= PI` and the damping
    /// factor must lie in `(0, 1]`.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let (lo, hi) = (self.min_polar_angle, self.max_polar_angle);
        let ordered = 0.0 <= lo && lo <= hi && hi <= PI;
        if !(lo.is_finite() && hi.is_finite() && ordered) {
            return Err(ViewerError::InvalidOptions(format!(
                "polar angles must satisfy 0 <= min <= max <= PI \
                 (got min={lo}, max={hi})"
            )));
        }
        let factor = self.damping_factor;
        if factor.is_nan() || factor <= 0.0 || factor > 1.0 {
            return Err(ViewerError::InvalidOptions(format!(
                "damping_factor must be in (0, 1] (got {factor})"
            )));
        }
        Ok(())
    }
}
