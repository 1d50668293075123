//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, controller damping, pan fence, sky
//! presets, keybindings) are consolidated here. Options serialize to/from
//! TOML for view presets stored in `assets/view_presets/`.

mod bounds;
mod camera;
mod controls;
mod environment;

use std::path::Path;

pub use bounds::BoundsOptions;
pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use environment::{
    EnvironmentOptions, EnvironmentPreset, FALLBACK_INTENSITY,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[bounds]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, start pose, and input sensitivity.
    pub camera: CameraOptions,
    /// Orbit/pan controller behaviour.
    pub controls: ControlsOptions,
    /// Pan fence and zoom band parameters.
    pub bounds: BoundsOptions,
    /// Sky/lighting presets.
    pub environment: EnvironmentOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::ViewCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[bounds]
pan_margin_fraction = 0.1
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.bounds.pan_margin_fraction, 0.1);
        // Everything else should be default
        assert_eq!(opts.bounds.min_distance_factor, 0.1);
        assert_eq!(opts.bounds.max_distance_factor, 0.2);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.environment.active, "day");
    }

    #[test]
    fn bundled_preset_parses() {
        let opts = Options::from_toml_str(include_str!(
            "../../assets/view_presets/wide_fence.toml"
        ))
        .unwrap();
        assert!(opts.bounds.refresh_on_zoom);
        assert_eq!(opts.environment.active, "sunset");
        assert!(opts.bounds.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[bounds\nfoo = ").unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(ViewCommand::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyE"),
            Some(ViewCommand::CycleEnvironment)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("seabed-view-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.environment.active = "midnight".into();
        opts.save(&dir.join("night.toml")).unwrap();
        Options::default().save(&dir.join("calm.toml")).unwrap();

        let loaded = Options::load(&dir.join("night.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), ["calm", "night"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("bounds"));
        assert!(props.contains_key("environment"));
        assert!(!props.contains_key("keybindings"));

        let bounds = &props["bounds"]["properties"];
        assert!(bounds.get("pan_margin_fraction").is_some());
        assert!(bounds.get("refresh_on_zoom").is_some());
        assert!(bounds.get("ground_parts").is_none());
    }
}
