use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bounds", inline)]
#[serde(default)]
/// Pan fence and zoom band derived from the ground footprint.
pub struct BoundsOptions {
    /// Minimum eye distance as a fraction of the footprint's longest side.
    #[schemars(title = "Min Distance Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub min_distance_factor: f32,
    /// Maximum eye distance as a fraction of the footprint's longest side.
    #[schemars(title = "Max Distance Factor", range(min = 0.02, max = 2.0), extend("step" = 0.01))]
    pub max_distance_factor: f32,
    /// Fraction of the visible window inset from each footprint edge.
    #[schemars(title = "Pan Margin", range(min = 0.0, max = 0.5), extend("step" = 0.05))]
    pub pan_margin_fraction: f32,
    /// Re-derive the pan fence when the zoom distance changes.
    #[schemars(title = "Refresh On Zoom")]
    pub refresh_on_zoom: bool,
    /// Horizontal scale applied to the ground parts before measuring.
    #[schemars(skip)]
    pub seabed_scale: f32,
    /// Names of the ground parts that make up the footprint.
    #[schemars(skip)]
    pub ground_parts: Vec<String>,
}

impl Default for BoundsOptions {
    fn default() -> Self {
        Self {
            min_distance_factor: 0.1,
            max_distance_factor: 0.2,
            pan_margin_fraction: 0.25,
            refresh_on_zoom: false,
            seabed_scale: 10.0,
            ground_parts: vec!["sand".into(), "water".into()],
        }
    }
}

impl BoundsOptions {
    /// Check the factor ordering and margin range.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let (k1, k2) = (self.min_distance_factor, self.max_distance_factor);
        if !(k1.is_finite() && k2.is_finite() && 0.0 < k1 && k1 < k2) {
            return Err(ViewerError::InvalidOptions(format!(
                "distance factors must satisfy 0 < min < max \
                 (got min={k1}, max={k2})"
            )));
        }
        let margin = self.pan_margin_fraction;
        if !margin.is_finite() || margin < 0.0 {
            return Err(ViewerError::InvalidOptions(format!(
                "pan_margin_fraction must be finite and >= 0 (got {margin})"
            )));
        }
        if !self.seabed_scale.is_finite() || self.seabed_scale <= 0.0 {
            return Err(ViewerError::InvalidOptions(format!(
                "seabed_scale must be positive (got {})",
                self.seabed_scale
            )));
        }
        Ok(())
    }
}
