use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One selectable sky/lighting preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct EnvironmentPreset {
    /// Preset key shown in the UI (e.g. `"day"`).
    pub name: String,
    /// Equirectangular HDR file name, relative to the HDRI directory.
    pub hdri: String,
    /// Environment light intensity while this preset is active.
    pub intensity: f32,
}

impl EnvironmentPreset {
    fn new(name: &str, hdri: &str, intensity: f32) -> Self {
        Self {
            name: name.to_owned(),
            hdri: hdri.to_owned(),
            intensity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Environment", inline)]
#[serde(default)]
/// Sky/lighting presets and the one selected on startup.
pub struct EnvironmentOptions {
    /// Name of the preset selected on startup.
    #[schemars(title = "Time")]
    pub active: String,
    /// Directory the HDRI files are served from.
    #[schemars(skip)]
    pub hdri_dir: String,
    /// Available presets, in cycling order.
    #[schemars(skip)]
    pub presets: Vec<EnvironmentPreset>,
}

/// Intensity used when a preset name is unknown.
pub const FALLBACK_INTENSITY: f32 = 1.0;

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            active: "day".into(),
            hdri_dir: "hdri".into(),
            presets: vec![
                EnvironmentPreset::new(
                    "day",
                    "autumn_field_puresky_2k.hdr",
                    0.7,
                ),
                EnvironmentPreset::new(
                    "sunset",
                    "rosendal_park_sunset_puresky_2k.hdr",
                    0.3,
                ),
                EnvironmentPreset::new("midnight", "NightSky4_2K.hdr", 2.0),
            ],
        }
    }
}

impl EnvironmentOptions {
    /// Look up a preset by name.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&EnvironmentPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Light intensity for `name`, falling back to
    /// [`FALLBACK_INTENSITY`].
    #[must_use]
    pub fn intensity_for(&self, name: &str) -> f32 {
        self.preset(name)
            .map_or(FALLBACK_INTENSITY, |p| p.intensity)
    }

    /// HDRI path for `name` (`<hdri_dir>/<file>`).
    #[must_use]
    pub fn hdri_path(&self, name: &str) -> Option<String> {
        self.preset(name)
            .map(|p| format!("{}/{}", self.hdri_dir, p.hdri))
    }

    /// Preset following `name` in cycling order (wraps around).
    #[must_use]
    pub fn next_after(&self, name: &str) -> Option<&EnvironmentPreset> {
        let idx = self
            .presets
            .iter()
            .position(|p| p.name == name)
            .map_or(0, |i| i + 1);
        self.presets
            .get(idx % self.presets.len().max(1))
    }
}
