//! Native frame-loop driver backed by winit.
//!
//! Opens a window, loads the ground description once, then ticks the
//! [`ViewEngine`] on every redraw. The eye position and sky preset are
//! shown in the window title; drawing the scene is left to the host
//! renderer, which reads [`ViewEngine::camera_uniform`].
//!
//! ```no_run
//! # use seabed_view::Viewer;
//! Viewer::builder()
//!     .with_ground("assets/seabed.toml")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::error::ViewerError;
use crate::ground::load_ground;
use crate::options::Options;
use crate::{InputEvent, MouseButton, ViewEngine};

/// Pixel-delta scroll events are scaled to roughly one wheel notch.
const PIXEL_SCROLL_SCALE: f32 = 0.01;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    ground: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            ground: None,
            options: None,
            title: "Seabed".into(),
        }
    }

    /// Ground description to load (`.toml` or `.json`).
    #[must_use]
    pub fn with_ground(mut self, path: impl Into<PathBuf>) -> Self {
        self.ground = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            ground: self.ground,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A native window driving a bounded seabed camera.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    ground: Option<PathBuf>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            ground: self.ground,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewEngine>,
    ground: Option<PathBuf>,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Resolve the one-shot ground load and derive the camera bounds.
    ///
    /// Failures leave the camera unconstrained; the engine has already
    /// logged why.
    fn setup_ground(&self, engine: &mut ViewEngine) {
        let Some(path) = &self.ground else {
            log::warn!("no ground description given, camera is unbounded");
            return;
        };
        let loaded = pollster::block_on(load_ground(path))
            .and_then(|mut ground| engine.on_ground_loaded(&mut ground));
        if let Err(e) = loaded {
            log::error!("ground setup failed for '{}': {e}", path.display());
        }
    }

    fn update_title(&self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let [x, y, z] = engine.camera_position_display();
        window.set_title(&format!(
            "{} | camera ({x:.2}, {y:.2}, {z:.2}) | sky {} | {:.0} fps",
            self.title,
            engine.environment().name,
            engine.fps(),
        ));
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let mut engine =
            ViewEngine::new(options, viewport_size(window.inner_size()));
        self.setup_ground(&mut engine);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.update_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.stop();
            }
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (vp_w, vp_h) = viewport_size(size);
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::RedrawRequested => {
                if engine.should_tick() && engine.tick() {
                    self.update_title();
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let _ = engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 * PIXEL_SCROLL_SCALE
                    }
                };
                let _ = engine.handle_input(InputEvent::Scroll { delta });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let _ = engine.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if engine.handle_key(&format!("{code:?}")) {
                    self.update_title();
                }
            }

            _ => (),
        }
    }
}
