use glam::{Mat4, Vec3};

/// How the camera maps view space onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Projection {
    /// Pinhole perspective driven by [`Camera::fovy`].
    #[default]
    Perspective,
    /// Parallel projection with a fixed world-space view height.
    Orthographic {
        /// World-space height of the view volume.
        height: f32,
    },
}

/// World-space extent visible through the viewport at some distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    /// Horizontal extent (maps to world X on a top-down view).
    pub width: f32,
    /// Vertical extent (maps to world Z on a top-down view).
    pub height: f32,
}

/// Camera defined by eye position, target, and projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Projection model.
    pub projection: Projection,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block a host renderer uploads for this camera.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Camera {
    /// Distance from the eye to the look-at target.
    #[must_use]
    pub fn distance_to_target(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Visible window at `distance` along the view direction.
    ///
    /// Perspective uses the pinhole relation `h = 2 d tan(fovy / 2)`;
    /// orthographic ignores the distance.
    #[must_use]
    pub fn visible_window(&self, distance: f32) -> VisibleWindow {
        let height = match self.projection {
            Projection::Perspective => {
                2.0 * distance * (self.fovy.to_radians() * 0.5).tan()
            }
            Projection::Orthographic { height } => height,
        };
        VisibleWindow {
            width: height * self.aspect,
            height,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.build_projection() * view
    }

    /// Projection matrix alone.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // [0,1] depth range (wgpu/Vulkan/WebGPU convention)
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh(
                self.fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { height } => {
                let half_h = height * 0.5;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
                )
            }
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.6,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        let forward = (camera.target - camera.eye).normalize_or_zero();
        self.forward = forward.to_array();
        self.fovy = camera.fovy;
    }
}
