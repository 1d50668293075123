//! Command dispatch and raw-input entry points for [`ViewEngine`].

use super::command::ViewCommand;
use super::ViewEngine;
use crate::input::InputEvent;

impl ViewEngine {
    /// Run one [`ViewCommand`].
    ///
    /// Camera commands only queue motion on the controls; it is applied,
    /// clamped when bounds are active, on the next [`tick`](Self::tick).
    pub fn execute(&mut self, command: ViewCommand) {
        let viewport_height = self.viewport.1 as f32;
        match command {
            ViewCommand::ResetCamera => self.reset_camera(),
            ViewCommand::RotateCamera { delta } => {
                self.controls.rotate(delta, viewport_height);
            }
            ViewCommand::PanCamera { delta } => {
                self.controls.pan(delta, &self.camera, viewport_height);
            }
            ViewCommand::Zoom { delta } => self.controls.zoom(delta),
            ViewCommand::SetEnvironment { name } => {
                self.set_environment(&name);
            }
            ViewCommand::CycleEnvironment => self.cycle_environment(),
        }
    }

    /// Translate a raw pointer event and run the resulting command.
    ///
    /// Returns `true` if a command was executed.
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.running {
            return false;
        }
        match self.input.handle_event(event) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Run the command bound to a physical key (`"KeyR"`, `"KeyE"`, ...).
    ///
    /// Returns `true` if the key was bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.running {
            return false;
        }
        match self.input.handle_key_press(key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }
}
