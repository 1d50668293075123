//! Ground-load hook and bounds setup for [`ViewEngine`].

use glam::Vec3;

use super::{ConstraintState, ViewEngine};
use crate::bounds::BoundsConstraint;
use crate::camera::ControlState;
use crate::error::ViewerError;
use crate::ground::GroundModel;

impl ViewEngine {
    /// Completion hook for the one-shot ground load.
    ///
    /// Scales the configured ground parts horizontally, measures their
    /// footprint and derives the camera bounds. On any failure the camera
    /// stays usable without clamping and the error is returned.
    pub fn on_ground_loaded(
        &mut self,
        ground: &mut GroundModel,
    ) -> Result<(), ViewerError> {
        let parts = self.options.bounds.ground_parts.as_slice();
        let _ = ground
            .scale_parts_horizontally(parts, self.options.bounds.seabed_scale);

        match ground.footprint_of(parts) {
            Ok(footprint) => {
                self.footprint = Some(footprint);
                self.initialize_constraints()
            }
            Err(e) => {
                self.fail_safe(&e);
                Err(e)
            }
        }
    }

    /// Derive the zoom band and pan fence from the current footprint.
    ///
    /// Replaces any previous constraint. On error the engine switches to
    /// [`ConstraintState::Unconstrained`], logs a warning and returns the
    /// error.
    pub fn initialize_constraints(&mut self) -> Result<(), ViewerError> {
        match BoundsConstraint::initialize(
            self.footprint.as_ref(),
            &mut self.camera,
            &mut self.controls,
            &self.options.bounds,
        ) {
            Ok(bounds) => {
                self.constraint = ConstraintState::Active(bounds);
                Ok(())
            }
            Err(e) => {
                self.fail_safe(&e);
                Err(e)
            }
        }
    }

    fn fail_safe(&mut self, error: &ViewerError) {
        log::warn!("camera bounds disabled: {error}");
        self.constraint = ConstraintState::Unconstrained;
    }

    /// Return the camera to its configured start pose.
    ///
    /// Pending motion is dropped and one control step runs, clamped when
    /// bounds are active.
    pub fn reset_camera(&mut self) {
        let start = &self.options.camera;
        let target = Vec3::from_array(start.start_target);
        self.camera.eye = Vec3::from_array(start.start_position);
        self.camera.target = target;
        self.controls.stop();
        self.controls.set_target(target);
        let _ = self.step_controls();
    }
}
