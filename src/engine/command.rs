//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation — whether triggered by a key press, mouse
//! gesture, UI control, or programmatic call — is represented as a
//! `ViewCommand`. Consumers construct commands and pass them to
//! [`ViewEngine::execute`](super::ViewEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered — keyboard, mouse,
/// UI, or API all look identical:
///
/// ```ignore
/// engine.execute(ViewCommand::CycleEnvironment);
/// engine.execute(ViewCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Return the camera to its configured start pose.
    ResetCamera,

    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan across the ground plane by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Environment ─────────────────────────────────────────────────
    /// Select a sky/lighting preset by name.
    SetEnvironment {
        /// Preset name (e.g. `"sunset"`).
        name: String,
    },

    /// Advance to the next sky/lighting preset.
    CycleEnvironment,
}
