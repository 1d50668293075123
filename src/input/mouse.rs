use glam::Vec2;

use super::event::MouseButton;

/// Movement (squared pixels) after which a press counts as a drag.
const DRAG_THRESHOLD_SQ: f32 = 1.0;

/// Tracks cursor position, held buttons, and whether a drag is underway.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    last_pos: Option<Vec2>,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    pub is_dragging: bool,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a button transition. Releasing the last held button ends the
    /// drag.
    pub(crate) fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Middle => self.middle = pressed,
        }
        if !self.any_pressed() {
            self.is_dragging = false;
        }
    }

    pub(crate) fn any_pressed(&self) -> bool {
        self.left || self.right || self.middle
    }

    /// Update the cursor and return the delta since the previous position
    /// (zero for the first sample).
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> Vec2 {
        let pos = Vec2::new(x, y);
        let delta = self.last_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        if self.any_pressed() && delta.length_squared() > DRAG_THRESHOLD_SQ {
            self.is_dragging = true;
        }
        delta
    }

    pub(crate) fn mouse_pos(&self) -> Option<Vec2> {
        self.last_pos
    }
}
