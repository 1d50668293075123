use glam::Vec3;

use super::footprint::Footprint;
use super::region::{ConstraintRegion, RegionWarning, ZoomLimits};
use crate::camera::{Camera, ControlState, Projection};
use crate::error::ViewerError;
use crate::options::BoundsOptions;

/// Relative change in eye distance that triggers a region refresh when
/// `refresh_on_zoom` is set.
const REFRESH_TOLERANCE: f32 = 1e-3;

/// Keeps the camera target and eye over the ground footprint.
///
/// Built once, after the ground has loaded, by [`initialize`]. The frame
/// loop then calls [`step`] every frame in place of the controller's own
/// update: the target and eye are clamped into the region first and only
/// then is the controller's damped update run, so interpolation always
/// starts from in-bounds endpoints.
///
/// [`initialize`]: Self::initialize
/// [`step`]: Self::step
#[derive(Debug, Clone)]
pub struct BoundsConstraint {
    footprint: Footprint,
    region: ConstraintRegion,
    zoom: ZoomLimits,
    pan_margin_fraction: f32,
    refresh_on_zoom: bool,
    /// Eye distance the current region was derived from.
    region_distance: f32,
    warnings: Vec<RegionWarning>,
}

impl BoundsConstraint {
    /// Derive the zoom band and pan fence from `footprint` and the camera's
    /// current pose, then centre `controls` on the footprint.
    ///
    /// On success the controls' distance limits and target have been
    /// written and one (unclamped) control update has run. On error neither
    /// `camera` nor `controls` is touched, so the caller can keep driving an
    /// unconstrained camera.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::UninitializedFootprint`] when `footprint` is `None`
    /// - [`ViewerError::InvalidOptions`] for out-of-range factors
    /// - [`ViewerError::DegenerateFootprint`] for a zero-area footprint
    /// - [`ViewerError::InvalidCamera`] for an unusable FOV, aspect or
    ///   distance
    pub fn initialize<C: ControlState + ?Sized>(
        footprint: Option<&Footprint>,
        camera: &mut Camera,
        controls: &mut C,
        options: &BoundsOptions,
    ) -> Result<Self, ViewerError> {
        let footprint = *footprint.ok_or(ViewerError::UninitializedFootprint)?;
        options.validate()?;
        footprint.validate()?;

        let center = footprint.center();
        let distance = camera.eye.distance(center);
        validate_camera(camera, distance)?;

        let zoom = ZoomLimits::from_footprint(
            &footprint,
            options.min_distance_factor,
            options.max_distance_factor,
        );
        let (region, warnings) = derive_region(
            &footprint,
            camera,
            distance,
            options.pan_margin_fraction,
        );
        for warning in &warnings {
            log::warn!("{warning}");
        }

        controls.set_distance_limits(zoom.min_distance, zoom.max_distance);
        controls.set_target(center);
        let _ = controls.update(camera);

        log::info!(
            "pan fence x=[{:.2}, {:.2}] z=[{:.2}, {:.2}], zoom [{:.2}, {:.2}] \
             (footprint {:.1}x{:.1}, eye distance {distance:.2})",
            region.min_x(),
            region.max_x(),
            region.min_z(),
            region.max_z(),
            zoom.min_distance,
            zoom.max_distance,
            footprint.size().x,
            footprint.size().z,
        );

        Ok(Self {
            footprint,
            region,
            zoom,
            pan_margin_fraction: options.pan_margin_fraction,
            refresh_on_zoom: options.refresh_on_zoom,
            region_distance: distance,
            warnings,
        })
    }

    /// Clamp the horizontal coordinates of `target` and `eye` into the
    /// region. Heights are left alone.
    pub fn clamp(&self, target: &mut Vec3, eye: &mut Vec3) {
        *target = self.region.clamp_point(*target);
        *eye = self.region.clamp_point(*eye);
    }

    /// Per-frame update: clamp the controls' target and the camera eye,
    /// then delegate to the controls' own update.
    ///
    /// Only the target is guaranteed to be inside the region on return.
    /// The delegated update rebuilds the eye around the target and applies
    /// its own polar and distance clamps, so the eye can end up past the
    /// fence until the next step; call [`clamp`](Self::clamp) directly
    /// when the eye itself must be contained.
    ///
    /// Returns whatever the delegated update returns.
    pub fn step<C: ControlState + ?Sized>(
        &mut self,
        controls: &mut C,
        camera: &mut Camera,
    ) -> bool {
        if self.refresh_on_zoom {
            let _ = self.refresh(camera);
        }
        let mut target = controls.target();
        self.clamp(&mut target, &mut camera.eye);
        controls.set_target(target);
        controls.update(camera)
    }

    /// Re-derive the region from the camera's current eye-to-target
    /// distance. Returns `true` if the region was rebuilt.
    ///
    /// A no-op when the distance is unchanged or unusable.
    pub fn refresh(&mut self, camera: &Camera) -> bool {
        let distance = camera.distance_to_target();
        if !distance.is_finite() {
            return false;
        }
        let tolerance = REFRESH_TOLERANCE * self.region_distance.max(1.0);
        if (distance - self.region_distance).abs() <= tolerance {
            return false;
        }

        let (region, warnings) = derive_region(
            &self.footprint,
            camera,
            distance,
            self.pan_margin_fraction,
        );
        log::debug!(
            "pan fence refreshed for distance {distance:.2}: x=[{:.2}, {:.2}] \
             z=[{:.2}, {:.2}]",
            region.min_x(),
            region.max_x(),
            region.min_z(),
            region.max_z(),
        );
        self.region = region;
        self.warnings = warnings;
        self.region_distance = distance;
        true
    }

    /// Current clamp rectangle.
    #[must_use]
    pub fn region(&self) -> &ConstraintRegion {
        &self.region
    }

    /// Distance band written into the controls.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom
    }

    /// Footprint the constraint was derived from.
    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Inversions resolved while deriving the current region.
    #[must_use]
    pub fn warnings(&self) -> &[RegionWarning] {
        &self.warnings
    }

    /// Eye distance the current region was derived from.
    #[must_use]
    pub fn region_distance(&self) -> f32 {
        self.region_distance
    }
}

fn derive_region(
    footprint: &Footprint,
    camera: &Camera,
    distance: f32,
    margin: f32,
) -> (ConstraintRegion, Vec<RegionWarning>) {
    let window = camera.visible_window(distance);
    ConstraintRegion::from_footprint(
        footprint,
        window.width * margin,
        window.height * margin,
    )
}

fn validate_camera(camera: &Camera, distance: f32) -> Result<(), ViewerError> {
    match camera.projection {
        Projection::Perspective => {
            let fovy = camera.fovy;
            if !(fovy.is_finite() && fovy > 0.0 && fovy < 180.0) {
                return Err(ViewerError::InvalidCamera(format!(
                    "vertical fov must be in (0, 180) degrees (got {fovy})"
                )));
            }
        }
        Projection::Orthographic { height } => {
            if !(height.is_finite() && height > 0.0) {
                return Err(ViewerError::InvalidCamera(format!(
                    "orthographic height must be positive (got {height})"
                )));
            }
        }
    }
    let aspect = camera.aspect;
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(ViewerError::InvalidCamera(format!(
            "aspect ratio must be positive (got {aspect})"
        )));
    }
    if !distance.is_finite() {
        return Err(ViewerError::InvalidCamera(format!(
            "eye distance to footprint is not finite (got {distance})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::bounds::region::RegionAxis;
    use crate::camera::MapControls;

    fn seabed(half: f32) -> Footprint {
        Footprint::from_corners(
            Vec3::new(-half, -1.0, -half),
            Vec3::new(half, 1.0, half),
        )
    }

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 36.0, 48.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
            projection: Projection::Perspective,
        }
    }

    fn controls() -> MapControls {
        let mut controls = MapControls::new(Vec3::ZERO);
        controls.set_damping(false, 0.05);
        controls
    }

    /// Records what the delegated update saw.
    #[derive(Default)]
    struct RecordingControls {
        target: Vec3,
        limits: (f32, f32),
        seen: Vec<(Vec3, Vec3)>,
    }

    impl ControlState for RecordingControls {
        fn target(&self) -> Vec3 {
            self.target
        }
        fn set_target(&mut self, target: Vec3) {
            self.target = target;
        }
        fn distance_limits(&self) -> (f32, f32) {
            self.limits
        }
        fn set_distance_limits(&mut self, min: f32, max: f32) {
            self.limits = (min, max);
        }
        fn update(&mut self, camera: &mut Camera) -> bool {
            self.seen.push((self.target, camera.eye));
            camera.target = self.target;
            false
        }
    }

    #[test]
    fn reference_scene_region_and_zoom() {
        let mut cam = camera();
        let mut ctl = controls();
        let bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();

        // h = 2 * 60 * tan(37.5°) ≈ 92.08, w ≈ 163.70
        // offsets ≈ (40.92, 23.02)
        let region = bounds.region();
        assert!((region.min_x() + 9.08).abs() < 0.01);
        assert!((region.max_x() - 9.08).abs() < 0.01);
        assert!((region.min_z() + 26.98).abs() < 0.01);
        assert!((region.max_z() - 26.98).abs() < 0.01);
        assert!(region.min_x() <= region.max_x());
        assert!(bounds.warnings().is_empty());
        assert!((bounds.region_distance() - 60.0).abs() < 1e-4);

        let zoom = bounds.zoom_limits();
        assert!((zoom.min_distance - 10.0).abs() < 1e-5);
        assert!((zoom.max_distance - 20.0).abs() < 1e-5);
        assert_eq!(ctl.distance_limits(), (zoom.min_distance, zoom.max_distance));

        // Target centred and the forced refresh pulled the eye into the
        // zoom band.
        assert_eq!(ctl.target(), Vec3::ZERO);
        assert!((cam.distance_to_target() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn step_contains_target_but_eye_can_overshoot() {
        let mut cam = camera();
        let mut ctl = controls();
        let mut bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();
        let region = *bounds.region();

        // Target just inside the +X edge, eye far beyond it.
        ctl.set_target(Vec3::new(9.0, 0.0, 0.0));
        cam.eye = Vec3::new(25.0, 10.0, 0.0);
        let _ = bounds.step(&mut ctl, &mut cam);

        assert!(region.contains(ctl.target()));
        // The clamped eye sat almost straight above the target; the polar
        // clamp tips it back out past the fence.
        assert!(cam.eye.x > region.max_x());

        let mut target = ctl.target();
        bounds.clamp(&mut target, &mut cam.eye);
        assert!(region.contains(cam.eye));
    }

    #[test]
    fn small_footprint_collapses_to_center() {
        let mut cam = camera();
        let mut ctl = controls();
        let fp = Footprint::from_corners(
            Vec3::new(8.0, 0.0, -4.0),
            Vec3::new(12.0, 2.0, 0.0),
        );
        let bounds = BoundsConstraint::initialize(
            Some(&fp),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();

        let region = bounds.region();
        let center = fp.center();
        assert_eq!(region.min_x(), region.max_x());
        assert_eq!(region.min_z(), region.max_z());
        assert!((region.min_x() - center.x).abs() < 1e-4);
        assert!((region.min_z() - center.z).abs() < 1e-4);

        let axes: Vec<RegionAxis> = bounds
            .warnings()
            .iter()
            .map(|RegionWarning::Inverted { axis, .. }| *axis)
            .collect();
        assert_eq!(axes, [RegionAxis::X, RegionAxis::Z]);
    }

    #[test]
    fn missing_footprint_fails_loudly() {
        let mut cam = camera();
        let mut ctl = RecordingControls::default();
        let err = BoundsConstraint::initialize(
            None,
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::UninitializedFootprint));
        assert!(ctl.seen.is_empty());
    }

    #[test]
    fn invalid_inputs_leave_camera_untouched() {
        let flat = Footprint::from_corners(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(5.0, 1.0, 0.0),
        );
        let mut cam = camera();
        let mut ctl = RecordingControls::default();
        let err = BoundsConstraint::initialize(
            Some(&flat),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::DegenerateFootprint { .. }));

        for bad in [
            Camera { fovy: 0.0, ..camera() },
            Camera { fovy: 180.0, ..camera() },
            Camera { aspect: f32::INFINITY, ..camera() },
            Camera { aspect: 0.0, ..camera() },
            Camera {
                eye: Vec3::new(f32::INFINITY, 0.0, 0.0),
                ..camera()
            },
            Camera {
                projection: Projection::Orthographic { height: -1.0 },
                ..camera()
            },
        ] {
            let mut cam = bad.clone();
            let err = BoundsConstraint::initialize(
                Some(&seabed(50.0)),
                &mut cam,
                &mut ctl,
                &BoundsOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, ViewerError::InvalidCamera(_)), "{bad:?}");
            assert_eq!(cam, bad);
        }

        let bad_opts = BoundsOptions {
            min_distance_factor: 0.5,
            max_distance_factor: 0.2,
            ..BoundsOptions::default()
        };
        let err = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &bad_opts,
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::InvalidOptions(_)));

        assert!(ctl.seen.is_empty());
        assert_eq!(ctl.distance_limits(), (0.0, 0.0));
        assert_eq!(cam, camera());
    }

    #[test]
    fn step_clamps_before_delegating() {
        let mut cam = camera();
        let mut ctl = RecordingControls::default();
        let mut bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();
        ctl.seen.clear();

        ctl.target = Vec3::new(300.0, 4.0, -300.0);
        cam.eye = Vec3::new(-300.0, 12.0, 300.0);
        let _ = bounds.step(&mut ctl, &mut cam);

        let (seen_target, seen_eye) = ctl.seen[0];
        let region = *bounds.region();
        assert_eq!(
            seen_target,
            Vec3::new(region.max_x(), 4.0, region.min_z())
        );
        assert_eq!(seen_eye, Vec3::new(region.min_x(), 12.0, region.max_z()));
    }

    #[test]
    fn orthographic_window_drives_offsets() {
        let mut cam = Camera {
            projection: Projection::Orthographic { height: 20.0 },
            aspect: 2.0,
            ..camera()
        };
        let mut ctl = controls();
        let bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();
        // offsets = (40 * 0.25, 20 * 0.25)
        assert!((bounds.region().max_x() - 40.0).abs() < 1e-4);
        assert!((bounds.region().max_z() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn pan_margin_is_configurable() {
        let mut cam = camera();
        let mut ctl = controls();
        let opts = BoundsOptions {
            pan_margin_fraction: 0.0,
            ..BoundsOptions::default()
        };
        let bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &opts,
        )
        .unwrap();
        assert_eq!(bounds.region().min_x(), -50.0);
        assert_eq!(bounds.region().max_z(), 50.0);
    }

    #[test]
    fn fixed_fence_ignores_zoom_by_default() {
        let mut cam = camera();
        let mut ctl = controls();
        let mut bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &BoundsOptions::default(),
        )
        .unwrap();
        let before = *bounds.region();

        ctl.zoom(30.0);
        for _ in 0..3 {
            let _ = bounds.step(&mut ctl, &mut cam);
        }
        assert!((cam.distance_to_target() - 10.0).abs() < 1e-3);
        assert_eq!(*bounds.region(), before);
    }

    #[test]
    fn refresh_on_zoom_widens_fence_when_closer() {
        let mut cam = camera();
        let mut ctl = controls();
        let opts = BoundsOptions {
            refresh_on_zoom: true,
            ..BoundsOptions::default()
        };
        let mut bounds = BoundsConstraint::initialize(
            Some(&seabed(50.0)),
            &mut cam,
            &mut ctl,
            &opts,
        )
        .unwrap();
        let before = *bounds.region();

        // First step sees the post-setup distance (20) and rebuilds.
        let _ = bounds.step(&mut ctl, &mut cam);
        assert!((bounds.region_distance() - 20.0).abs() < 1e-3);
        assert!(bounds.region().max_x() > before.max_x());

        // Unchanged distance: no rebuild.
        assert!(!bounds.refresh(&cam));

        let window = cam.visible_window(20.0);
        let expected = 50.0 - window.width * 0.25;
        assert!((bounds.region().max_x() - expected).abs() < 1e-3);
    }

    #[test]
    fn doubling_footprint_doubles_zoom_band() {
        let opts = BoundsOptions::default();
        let zoom_for = |fp: Footprint| {
            let mut cam = camera();
            let mut ctl = controls();
            BoundsConstraint::initialize(Some(&fp), &mut cam, &mut ctl, &opts)
                .unwrap()
                .zoom_limits()
        };
        let base = zoom_for(seabed(37.0));
        let doubled = zoom_for(seabed(37.0).scaled(2.0));
        assert!((doubled.min_distance - 2.0 * base.min_distance).abs() < 1e-4);
        assert!((doubled.max_distance - 2.0 * base.max_distance).abs() < 1e-4);
    }

    #[test]
    fn random_setups_never_invert_and_always_contain() {
        let mut rng = StdRng::seed_from_u64(0x5eab_ed);
        let opts = BoundsOptions::default();

        for _ in 0..200 {
            let min = Vec3::new(
                rng.random_range(-500.0..500.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-500.0..500.0),
            );
            let size = Vec3::new(
                rng.random_range(0.5..1000.0),
                rng.random_range(0.0..20.0),
                rng.random_range(0.5..1000.0),
            );
            let fp = Footprint::from_corners(min, min + size);

            let mut cam = Camera {
                eye: fp.center()
                    + Vec3::new(
                        rng.random_range(-300.0..300.0),
                        rng.random_range(1.0..300.0),
                        rng.random_range(-300.0..300.0),
                    ),
                fovy: rng.random_range(1.0..179.0),
                aspect: rng.random_range(0.2..5.0),
                ..camera()
            };
            let mut ctl = controls();
            let mut bounds = BoundsConstraint::initialize(
                Some(&fp),
                &mut cam,
                &mut ctl,
                &opts,
            )
            .unwrap();
            let region = *bounds.region();
            assert!(region.min_x() <= region.max_x());
            assert!(region.min_z() <= region.max_z());

            for _ in 0..20 {
                let mut target = Vec3::new(
                    rng.random_range(-2000.0..2000.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-2000.0..2000.0),
                );
                let mut eye = Vec3::new(
                    rng.random_range(-2000.0..2000.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-2000.0..2000.0),
                );
                let (ty, ey) = (target.y, eye.y);
                bounds.clamp(&mut target, &mut eye);
                assert!(region.contains(target) && region.contains(eye));
                assert_eq!((target.y, eye.y), (ty, ey));

                // Clamping again is a no-op.
                let (t2, e2) = (target, eye);
                bounds.clamp(&mut target, &mut eye);
                assert_eq!((target, eye), (t2, e2));
            }

            // Per-frame steps keep running without panicking on whatever
            // pose the clamp produced.
            ctl.pan(glam::Vec2::new(5000.0, -5000.0), &cam, 600.0);
            for _ in 0..5 {
                let _ = bounds.step(&mut ctl, &mut cam);
                assert!(cam.eye.is_finite());
            }
        }
    }
}
