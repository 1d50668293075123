//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and
//! [`ViewEngine::execute`](crate::ViewEngine::execute).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use super::mouse::InputState;
use crate::engine::command::ViewCommand;

/// Zoom delta produced per pixel of vertical middle-button drag.
const DRAG_ZOOM_PER_PIXEL: f32 = 0.05;

/// Maps physical key strings to [`ViewCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format, which
/// matches DOM `KeyboardEvent.code`: `"KeyR"`, `"KeyE"`, `"Escape"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Return the camera to its start pose.
    ResetCamera,
    /// Switch to the next sky/lighting preset.
    CycleEnvironment,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewCommand`].
    fn to_command(self) -> ViewCommand {
        match self {
            Self::ResetCamera => ViewCommand::ResetCamera,
            Self::CycleEnvironment => ViewCommand::CycleEnvironment,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyCommandTag::ResetCamera),
            ("KeyE".into(), KeyCommandTag::CycleEnvironment),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewCommand`]s.
///
/// Gesture mapping follows map-style controls: left drag pans across the
/// ground plane, right drag (or shift + left drag) orbits, middle drag and
/// the scroll wheel zoom.
pub struct InputProcessor {
    /// Cursor and button tracking.
    state: InputState,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            shift_pressed: false,
            key_bindings: KeyBindings::default(),
        }
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Last cursor position in physical pixels, if any was seen.
    #[must_use]
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.state.mouse_pos().map(|p| (p.x, p.y))
    }

    /// Whether any mouse button is held and the cursor has moved.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.state.set_button(button, pressed);
                None
            }
            InputEvent::Scroll { delta } => Some(ViewCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved — compute delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewCommand> {
        let delta = self.state.handle_mouse_position(x, y);
        if delta == glam::Vec2::ZERO {
            return None;
        }

        let state = &self.state;
        if state.right || (state.left && self.shift_pressed) {
            return Some(ViewCommand::RotateCamera { delta });
        }
        if state.left {
            return Some(ViewCommand::PanCamera { delta });
        }
        if state.middle {
            return Some(ViewCommand::Zoom {
                delta: -delta.y * DRAG_ZOOM_PER_PIXEL,
            });
        }
        None
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
