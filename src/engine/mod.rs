//! The per-session view context driven by the frame loop.
//!
//! [`ViewEngine`] replaces ambient global state: the driver creates one,
//! forwards input to it, hands it the loaded ground, and ticks it once per
//! frame.

mod accessors;
pub mod command;
mod constraints;
mod input;

use glam::Vec3;

pub use self::accessors::ActiveEnvironment;
use crate::bounds::{BoundsConstraint, Footprint};
use crate::camera::{Camera, ControlState, MapControls, Projection};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit for the native driver (0 = unlimited).
const TARGET_FPS: u32 = 300;

/// Whether the per-frame step clamps the camera.
#[derive(Debug, Clone)]
pub enum ConstraintState {
    /// The ground has not loaded yet; frames run the bare control update.
    Pending,
    /// Bounds are derived; every frame runs the clamp-then-delegate step.
    Active(BoundsConstraint),
    /// Setup failed; the camera keeps working without clamping.
    Unconstrained,
}

impl ConstraintState {
    /// The live constraint, if setup succeeded.
    #[must_use]
    pub fn constraint(&self) -> Option<&BoundsConstraint> {
        match self {
            Self::Active(bounds) => Some(bounds),
            Self::Pending | Self::Unconstrained => None,
        }
    }
}

/// Per-session view context owned by the frame-loop driver.
///
/// Holds the camera, the map controls, the bounds constraint, the active
/// sky preset and frame timing. Nothing here is global: the native viewer
/// owns one directly and the web driver shares one through
/// `Rc<RefCell<_>>`.
///
/// # Frame loop
///
/// ```ignore
/// let mut engine = ViewEngine::new(options, (width, height));
/// engine.on_ground_loaded(&mut ground)?;
/// // every frame:
/// engine.tick();
/// let uniform = engine.camera_uniform();
/// ```
///
/// # Input
///
/// Raw events go through [`handle_input`](Self::handle_input); every
/// resulting operation is a [`ViewCommand`](command::ViewCommand) run by
/// [`execute`](Self::execute).
pub struct ViewEngine {
    camera: Camera,
    controls: MapControls,
    constraint: ConstraintState,
    /// Footprint of the most recently loaded ground.
    footprint: Option<Footprint>,
    options: Options,
    input: InputProcessor,
    /// Viewport size in physical pixels.
    viewport: (u32, u32),
    /// Active sky preset name.
    environment: String,
    frame_timing: FrameTiming,
    running: bool,
}

impl ViewEngine {
    /// Engine with the camera at its configured start pose and no bounds.
    #[must_use]
    pub fn new(options: Options, (width, height): (u32, u32)) -> Self {
        let camera = Camera {
            eye: Vec3::from_array(options.camera.start_position),
            target: Vec3::from_array(options.camera.start_target),
            up: Vec3::Y,
            aspect: aspect_of(width, height),
            fovy: options.camera.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
            projection: Projection::Perspective,
        };
        let controls =
            MapControls::from_options(&options.camera, &options.controls);
        let input = InputProcessor::with_key_bindings(
            options.keybindings.clone(),
        );
        let environment = options.environment.active.clone();

        log::info!(
            "view engine {width}x{height}, eye {:?}, sky '{environment}'",
            camera.eye
        );

        Self {
            camera,
            controls,
            constraint: ConstraintState::Pending,
            footprint: None,
            options,
            input,
            viewport: (width, height),
            environment,
            frame_timing: FrameTiming::new(TARGET_FPS),
            running: true,
        }
    }

    /// Run one frame's control step. Returns `true` when the camera moved.
    ///
    /// Once constraints are active this is clamp then delegated update;
    /// before the ground has loaded (or after setup failed) it is the bare
    /// controller update. A no-op after [`stop`](Self::stop).
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let moved = self.step_controls();
        self.frame_timing.end_frame();
        moved
    }

    fn step_controls(&mut self) -> bool {
        match &mut self.constraint {
            ConstraintState::Active(bounds) => {
                bounds.step(&mut self.controls, &mut self.camera)
            }
            ConstraintState::Pending | ConstraintState::Unconstrained => {
                self.controls.update(&mut self.camera)
            }
        }
    }

    /// Whether the native frame cap allows another tick yet.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.running && self.frame_timing.should_render()
    }

    /// Stop the frame loop; later ticks do nothing and pending motion is
    /// dropped.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("view engine stopped");
        }
        self.running = false;
        self.controls.stop();
    }

    /// Whether [`stop`](Self::stop) has not been called.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

fn aspect_of(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::engine::command::ViewCommand;
    use crate::error::ViewerError;
    use crate::ground::GroundModel;
    use crate::options::ControlsOptions;

    pub(super) const GROUND: &str = r#"
        [[parts]]
        name = "sand"
        min = [-5.0, -1.0, -5.0]
        max = [5.0, 0.0, 5.0]

        [[parts]]
        name = "water"
        min = [-5.0, 0.0, -5.0]
        max = [5.0, 1.0, 5.0]
    "#;

    pub(super) fn undamped_options() -> Options {
        Options {
            controls: ControlsOptions {
                enable_damping: false,
                ..ControlsOptions::default()
            },
            ..Options::default()
        }
    }

    pub(super) fn loaded_engine() -> ViewEngine {
        let mut engine = ViewEngine::new(undamped_options(), (1600, 900));
        let mut ground = GroundModel::from_toml_str(GROUND).unwrap();
        engine.on_ground_loaded(&mut ground).unwrap();
        engine
    }

    #[test]
    fn starts_at_configured_pose_without_bounds() {
        let engine = ViewEngine::new(Options::default(), (1600, 900));
        let camera = engine.camera();
        assert_eq!(camera.eye, Vec3::new(-10.0, 10.0, 20.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.fovy, 75.0);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 100.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        assert!(matches!(engine.constraint_state(), ConstraintState::Pending));
        assert!(engine.is_running());
    }

    #[test]
    fn pending_frames_are_not_clamped() {
        let mut engine = ViewEngine::new(undamped_options(), (1600, 900));
        engine.execute(ViewCommand::PanCamera {
            delta: Vec2::new(-20_000.0, 0.0),
        });
        let _ = engine.tick();
        let _ = engine.tick();
        assert!(engine.controls().target().x > 100.0);
    }

    #[test]
    fn ground_load_activates_bounds() {
        let engine = loaded_engine();
        let bounds = engine.constraint_state().constraint().unwrap();

        // sand and water scaled x10 horizontally: 100 x 100 footprint
        let zoom = bounds.zoom_limits();
        assert!((zoom.min_distance - 10.0).abs() < 1e-4);
        assert!((zoom.max_distance - 20.0).abs() < 1e-4);
        assert_eq!(
            engine.controls().distance_limits(),
            (zoom.min_distance, zoom.max_distance)
        );
        assert_eq!(engine.controls().target(), Vec3::ZERO);
        assert_eq!(engine.footprint(), Some(bounds.footprint()));
        assert!(bounds.warnings().is_empty());
    }

    #[test]
    fn active_frames_pull_target_back_inside() {
        let mut engine = loaded_engine();
        engine.execute(ViewCommand::PanCamera {
            delta: Vec2::new(-20_000.0, 8_000.0),
        });
        // The pan lands during the first update; the next frame clamps it.
        let _ = engine.tick();
        let _ = engine.tick();

        let region = *engine.constraint_state().constraint().unwrap().region();
        let target = engine.controls().target();
        assert!(region.contains(target));
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn setup_failure_leaves_camera_unconstrained() {
        let mut options = undamped_options();
        options.bounds.ground_parts = vec!["sand".into(), "kelp".into()];
        let mut engine = ViewEngine::new(options, (1600, 900));
        let mut ground = GroundModel::from_toml_str(GROUND).unwrap();

        let err = engine.on_ground_loaded(&mut ground).unwrap_err();
        assert!(matches!(err, ViewerError::GroundLoad(_)));
        assert!(matches!(
            engine.constraint_state(),
            ConstraintState::Unconstrained
        ));

        engine.execute(ViewCommand::PanCamera {
            delta: Vec2::new(-20_000.0, 0.0),
        });
        assert!(engine.tick());
        let _ = engine.tick();
        assert!(engine.controls().target().x > 100.0);
    }

    #[test]
    fn constraints_need_a_footprint() {
        let mut engine = ViewEngine::new(Options::default(), (800, 600));
        assert!(matches!(
            engine.initialize_constraints(),
            Err(ViewerError::UninitializedFootprint)
        ));
        assert!(matches!(
            engine.constraint_state(),
            ConstraintState::Unconstrained
        ));
    }

    #[test]
    fn inverted_polar_band_in_options_does_not_break_ticks() {
        let options = Options::from_toml_str(
            "[controls]\nmin_polar_angle = 1.5\nmax_polar_angle = 0.5\n",
        )
        .unwrap();
        let mut engine = ViewEngine::new(options, (1600, 900));
        engine.execute(ViewCommand::RotateCamera {
            delta: Vec2::new(0.0, 300.0),
        });
        for _ in 0..10 {
            let _ = engine.tick();
        }
        assert!(engine.camera().eye.is_finite());
    }

    #[test]
    fn stopped_engine_ignores_ticks() {
        let mut engine = loaded_engine();
        engine.execute(ViewCommand::Zoom { delta: 5.0 });
        engine.stop();
        let before = engine.camera().clone();
        assert!(!engine.tick());
        assert!(!engine.should_tick());
        assert_eq!(*engine.camera(), before);
        assert!(!engine.is_running());
    }
}
