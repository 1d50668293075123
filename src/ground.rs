//! Ground environment description and footprint extraction.
//!
//! A ground model is a flat list of named parts, each an axis-aligned local
//! box with a scale and translation. Only the parts' world-space bounds
//! matter to the camera: [`GroundModel::footprint_of`] unions the bounds of
//! the parts that make up the seabed.
//!
//! ```toml
//! [[parts]]
//! name = "sand"
//! min = [-5.0, -0.2, -5.0]
//! max = [5.0, 0.0, 5.0]
//!
//! [[parts]]
//! name = "water"
//! min = [-5.0, 0.0, -5.0]
//! max = [5.0, 3.0, 5.0]
//! translation = [0.0, 0.5, 0.0]
//! ```

use std::future::Future;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::Footprint;
use crate::error::ViewerError;

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

/// One named piece of the ground environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundPart {
    /// Part name, e.g. `"sand"`.
    pub name: String,
    /// Local-space minimum corner.
    pub min: [f32; 3],
    /// Local-space maximum corner.
    pub max: [f32; 3],
    /// Per-axis scale applied before translation.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// World-space translation.
    #[serde(default)]
    pub translation: [f32; 3],
}

impl GroundPart {
    /// World-space bounds of the transformed local box.
    ///
    /// Negative scales mirror the box; the corners are re-sorted so the
    /// result is always a valid min/max pair.
    #[must_use]
    pub fn world_bounds(&self) -> Footprint {
        let scale = Vec3::from_array(self.scale);
        let translation = Vec3::from_array(self.translation);
        Footprint::from_corners(
            Vec3::from_array(self.min) * scale + translation,
            Vec3::from_array(self.max) * scale + translation,
        )
    }
}

/// A loaded ground environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroundModel {
    /// Named parts in load order.
    #[serde(default)]
    pub parts: Vec<GroundPart>,
}

impl GroundModel {
    /// Parse a TOML ground description.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::GroundLoad(e.to_string()))
    }

    /// Parse a JSON ground description.
    pub fn from_json_str(content: &str) -> Result<Self, ViewerError> {
        serde_json::from_str(content)
            .map_err(|e| ViewerError::GroundLoad(e.to_string()))
    }

    /// First part called `name`.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&GroundPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Mutable access to the first part called `name`.
    pub fn part_mut(&mut self, name: &str) -> Option<&mut GroundPart> {
        self.parts.iter_mut().find(|p| p.name == name)
    }

    /// Set the X and Z scale of each named part to `scale` (Y scale 1).
    ///
    /// Missing names are logged and skipped. Returns how many parts were
    /// rescaled.
    pub fn scale_parts_horizontally<S: AsRef<str>>(
        &mut self,
        names: &[S],
        scale: f32,
    ) -> usize {
        let mut scaled = 0;
        for name in names {
            let name = name.as_ref();
            match self.part_mut(name) {
                Some(part) => {
                    part.scale = [scale, 1.0, scale];
                    scaled += 1;
                }
                None => log::warn!("ground part '{name}' not found, not scaled"),
            }
        }
        scaled
    }

    /// Union of the world bounds of the named parts.
    ///
    /// # Errors
    ///
    /// [`ViewerError::UninitializedFootprint`] for an empty name list,
    /// [`ViewerError::GroundLoad`] if any name is missing.
    pub fn footprint_of<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Footprint, ViewerError> {
        let mut footprint: Option<Footprint> = None;
        for name in names {
            let name = name.as_ref();
            let part = self.part(name).ok_or_else(|| {
                ViewerError::GroundLoad(format!(
                    "ground part '{name}' not found"
                ))
            })?;
            let bounds = part.world_bounds();
            footprint = Some(footprint.map_or(bounds, |fp| fp.union(&bounds)));
        }
        footprint.ok_or(ViewerError::UninitializedFootprint)
    }
}

/// Read and parse a ground description from disk.
///
/// `.json` files are parsed as JSON, everything else as TOML.
pub fn read_ground(path: &Path) -> Result<GroundModel, ViewerError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let model = if is_json {
        GroundModel::from_json_str(&content)?
    } else {
        GroundModel::from_toml_str(&content)?
    };
    log::info!(
        "loaded ground '{}' ({} parts)",
        path.display(),
        model.parts.len()
    );
    Ok(model)
}

/// One-shot load completion for the frame-loop drivers.
///
/// Nothing is read until the future is first polled; the read itself is a
/// blocking [`read_ground`]. Drive it with `pollster::block_on` natively;
/// constraint setup runs once the future resolves.
pub fn load_ground(
    path: &Path,
) -> impl Future<Output = Result<GroundModel, ViewerError>> {
    let path = path.to_path_buf();
    async move { read_ground(&path) }
}
