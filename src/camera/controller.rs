use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::control_state::ControlState;
use super::core::Camera;
use crate::options::{CameraOptions, ControlsOptions};

/// Smallest polar angle kept away from the poles to avoid a degenerate
/// look-at basis.
const POLE_EPS: f32 = 1e-6;
/// Squared movement below which an update is reported as "no change".
const CHANGE_EPS: f32 = 1e-6;

/// Eye offset from the target in spherical coordinates, `Y` up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around `Y`, measured from `+Z` towards `+X`.
    theta: f32,
    /// Polar angle from `+Y`.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// Map-style orbit/pan controller.
///
/// Input calls (`rotate`, `pan`, `zoom`) only accumulate pending motion;
/// [`ControlState::update`] applies it, clamps the polar angle and the
/// eye distance, and re-aims the camera. With damping enabled a fraction
/// of the pending motion is applied per update and the rest decays.
#[derive(Debug, Clone)]
pub struct MapControls {
    target: Vec3,
    /// Pending (theta, phi) rotation in radians.
    spherical_delta: Vec2,
    pan_offset: Vec3,
    /// Pending multiplicative change to the eye distance.
    scale: f32,

    min_distance: f32,
    max_distance: f32,
    min_polar_angle: f32,
    max_polar_angle: f32,

    enable_damping: bool,
    damping_factor: f32,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl MapControls {
    /// Controller orbiting `target` with default options.
    #[must_use]
    pub fn new(target: Vec3) -> Self {
        let mut controls = Self::from_options(
            &CameraOptions::default(),
            &ControlsOptions::default(),
        );
        controls.target = target;
        controls
    }

    /// Controller configured from options, orbiting the configured start
    /// target. Distance limits start unbounded.
    ///
    /// Controls options that fail [`ControlsOptions::validate`] are
    /// replaced by the defaults with a warning.
    #[must_use]
    pub fn from_options(
        camera: &CameraOptions,
        controls: &ControlsOptions,
    ) -> Self {
        let fallback;
        let controls = match controls.validate() {
            Ok(()) => controls,
            Err(e) => {
                log::warn!("{e}; using default controls");
                fallback = ControlsOptions::default();
                &fallback
            }
        };
        Self {
            target: Vec3::from_array(camera.start_target),
            spherical_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: controls.min_polar_angle,
            max_polar_angle: controls.max_polar_angle,
            enable_damping: controls.enable_damping,
            damping_factor: controls.damping_factor.clamp(0.0, 1.0),
            rotate_speed: camera.rotate_speed,
            pan_speed: camera.pan_speed,
            zoom_speed: camera.zoom_speed,
        }
    }

    /// Enable or disable damping.
    pub fn set_damping(&mut self, enabled: bool, factor: f32) {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(0.0, 1.0);
    }

    /// Orbit by a mouse drag of `delta` pixels in a viewport
    /// `viewport_height` pixels tall. A drag across the full height turns
    /// a full circle.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let angle = TAU * delta / viewport_height.max(1.0) * self.rotate_speed;
        self.spherical_delta -= angle;
    }

    /// Pan across the ground plane by a mouse drag of `delta` pixels.
    ///
    /// One pixel moves the target by one pixel's worth of world space at
    /// the target distance, so the ground appears to follow the cursor.
    pub fn pan(&mut self, delta: Vec2, camera: &Camera, viewport_height: f32) {
        let distance = camera.eye.distance(self.target);
        let world_per_px =
            camera.visible_window(distance).height / viewport_height.max(1.0);

        let forward = (self.target - camera.eye).normalize_or_zero();
        let mut right = forward.cross(camera.up).normalize_or_zero();
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        // Horizontal direction the camera faces, perpendicular to `right`.
        let ahead = camera.up.cross(right).normalize_or_zero();

        let step = delta * self.pan_speed * world_per_px;
        self.pan_offset += -right * step.x + ahead * step.y;
    }

    /// Dolly towards (positive) or away from (negative) the target.
    pub fn zoom(&mut self, delta: f32) {
        self.scale *= 0.95_f32.powf(self.zoom_speed * delta);
    }

    /// Drop any pending rotate/pan/zoom motion.
    pub fn stop(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    /// Whether a future update would still move the camera.
    #[must_use]
    pub fn has_pending_motion(&self) -> bool {
        self.spherical_delta.length_squared() > CHANGE_EPS
            || self.pan_offset.length_squared() > CHANGE_EPS
            || (self.scale - 1.0).abs() > CHANGE_EPS
    }
}

impl ControlState for MapControls {
    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// NaN limits are ignored and inverted limits are swapped, so the
    /// radius clamp in `update` always sees `min <= max`.
    fn set_distance_limits(&mut self, min: f32, max: f32) {
        if min.is_nan() || max.is_nan() {
            log::warn!("ignoring NaN distance limits ({min}, {max})");
            return;
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(0.0);
    }

    fn update(&mut self, camera: &mut Camera) -> bool {
        let previous_eye = camera.eye;
        let previous_target = camera.target;

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let mut spherical = Spherical::from_offset(camera.eye - self.target);
        spherical.theta += self.spherical_delta.x * factor;
        spherical.phi += self.spherical_delta.y * factor;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPS, PI - POLE_EPS);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        camera.eye = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            self.spherical_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        previous_eye.distance_squared(camera.eye) > CHANGE_EPS
            || previous_target.distance_squared(camera.target) > CHANGE_EPS
    }
}
