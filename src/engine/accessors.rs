//! Read-only queries and viewport plumbing for [`ViewEngine`].

use glam::Vec3;

use super::{aspect_of, ConstraintState, ViewEngine};
use crate::bounds::Footprint;
use crate::camera::{Camera, CameraUniform, MapControls};
use crate::options::Options;

/// Sky preset a host renderer should currently show.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEnvironment {
    /// Preset name.
    pub name: String,
    /// HDRI file path, `None` for an unknown preset.
    pub hdri_path: Option<String>,
    /// Environment light intensity.
    pub intensity: f32,
}

// ── Camera ──

impl ViewEngine {
    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The map controls driving the camera.
    #[must_use]
    pub fn controls(&self) -> &MapControls {
        &self.controls
    }

    /// Mutable access to the controls, e.g. to tune damping at runtime.
    pub fn controls_mut(&mut self) -> &mut MapControls {
        &mut self.controls
    }

    /// Uniform block for the host renderer.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform
    }

    /// Eye position rounded to two decimals, for on-screen readouts.
    #[must_use]
    pub fn camera_position_display(&self) -> [f32; 3] {
        let round = |v: f32| (v * 100.0).round() / 100.0;
        let Vec3 { x, y, z } = self.camera.eye;
        [round(x), round(y), round(z)]
    }
}

// ── Bounds ──

impl ViewEngine {
    /// Whether frames are clamped yet.
    #[must_use]
    pub fn constraint_state(&self) -> &ConstraintState {
        &self.constraint
    }

    /// Footprint of the last loaded ground.
    #[must_use]
    pub fn footprint(&self) -> Option<&Footprint> {
        self.footprint.as_ref()
    }
}

// ── Environment ──

impl ViewEngine {
    /// The selected sky preset with its resolved HDRI path and intensity.
    #[must_use]
    pub fn environment(&self) -> ActiveEnvironment {
        let env = &self.options.environment;
        ActiveEnvironment {
            name: self.environment.clone(),
            hdri_path: env.hdri_path(&self.environment),
            intensity: env.intensity_for(&self.environment),
        }
    }

    /// Select a sky preset. Unknown names are kept but light at the
    /// fallback intensity.
    pub fn set_environment(&mut self, name: &str) {
        if self.options.environment.preset(name).is_none() {
            log::warn!("unknown sky preset '{name}', using fallback intensity");
        }
        log::info!("sky preset '{name}'");
        name.clone_into(&mut self.environment);
    }

    /// Advance to the next sky preset in cycling order.
    pub fn cycle_environment(&mut self) {
        let next = self
            .options
            .environment
            .next_after(&self.environment)
            .map(|p| p.name.clone());
        if let Some(next) = next {
            self.set_environment(&next);
        }
    }
}

// ── Viewport and timing ──

impl ViewEngine {
    /// Track a new viewport size. The pan fence is not re-derived.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.aspect = aspect_of(width, height);
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::ViewCommand;
    use crate::engine::tests::loaded_engine;

    #[test]
    fn cycles_through_sky_presets() {
        let mut engine = ViewEngine::new(Options::default(), (800, 600));
        let day = engine.environment();
        assert_eq!(day.name, "day");
        assert_eq!(day.intensity, 0.7);
        assert_eq!(
            day.hdri_path.as_deref(),
            Some("hdri/autumn_field_puresky_2k.hdr")
        );

        let mut seen = Vec::new();
        for _ in 0..3 {
            engine.execute(ViewCommand::CycleEnvironment);
            seen.push(engine.environment().name);
        }
        assert_eq!(seen, ["sunset", "midnight", "day"]);
    }

    #[test]
    fn unknown_preset_uses_fallback_intensity() {
        let mut engine = ViewEngine::new(Options::default(), (800, 600));
        engine.execute(ViewCommand::SetEnvironment {
            name: "aurora".into(),
        });
        let env = engine.environment();
        assert_eq!(env.name, "aurora");
        assert_eq!(env.intensity, 1.0);
        assert_eq!(env.hdri_path, None);

        // Cycling from an unknown preset restarts at the first one.
        engine.cycle_environment();
        assert_eq!(engine.environment().name, "day");
    }

    #[test]
    fn position_readout_is_rounded() {
        let mut engine = ViewEngine::new(Options::default(), (800, 600));
        engine.camera.eye = Vec3::new(1.23456, -7.891, 0.005_1);
        assert_eq!(engine.camera_position_display(), [1.23, -7.89, 0.01]);
    }

    #[test]
    fn resize_updates_aspect_only() {
        let mut engine = loaded_engine();
        let region = *engine.constraint_state().constraint().unwrap().region();
        engine.resize(1000, 0);
        assert_eq!(engine.viewport(), (1000, 0));
        assert_eq!(engine.camera().aspect, 1000.0);
        assert_eq!(
            *engine.constraint_state().constraint().unwrap().region(),
            region
        );
        assert_eq!(engine.camera_uniform().aspect, 1000.0);
    }
}
