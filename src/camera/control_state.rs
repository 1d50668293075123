use glam::Vec3;

use super::core::Camera;

/// A controller that owns the camera's look-at target and a per-frame
/// update step.
///
/// The bounds constraint never replaces `update`; the frame loop calls the
/// constraint first and then delegates here, so damping always starts from
/// endpoints that are already inside the pan fence.
pub trait ControlState {
    /// Current look-at target.
    fn target(&self) -> Vec3;

    /// Move the look-at target without touching pending input.
    fn set_target(&mut self, target: Vec3);

    /// Current `(min, max)` eye-to-target distance band.
    fn distance_limits(&self) -> (f32, f32);

    /// Restrict the eye-to-target distance to `[min, max]`.
    fn set_distance_limits(&mut self, min: f32, max: f32);

    /// Apply pending input and damping, then re-aim `camera` at the target.
    ///
    /// Returns `true` when the camera moved.
    fn update(&mut self, camera: &mut Camera) -> bool;
}
