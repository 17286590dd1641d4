/// Platform-agnostic input handling
use glam::DVec2;

use crate::model::InputSnapshot;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Raw pointer movement, already in pixels
    MouseMove { dx: f64, dy: f64 },

    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

#[derive(Debug, Default)]
pub struct InputState {
    /// Motion accumulated since the last snapshot
    pub mouse_motion: DVec2,
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMove { dx, dy } => {
                // unlocked pointer movement belongs to the page / desktop, not the camera
                if self.pointer_locked {
                    self.mouse_motion += DVec2::new(*dx, *dy);
                }
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { visible: false } => {
                self.mouse_motion = DVec2::ZERO;
            }
            InputEvent::VisibilityChanged { visible: true } => {}
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
                if !locked {
                    self.mouse_motion = DVec2::ZERO;
                }
            }
        }
    }

    pub fn consume_motion(&mut self) -> DVec2 {
        std::mem::take(&mut self.mouse_motion)
    }

    /// Snapshot for the next tick; resets the motion accumulator
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot { mouse_motion: self.consume_motion() }
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub next_target: String,
    pub escape: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            next_target: "Tab".to_string(),
            escape: "Escape".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn wants_next_target(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.bindings.next_target)
    }

    pub fn is_escape(&self, key: &str) -> bool {
        key == self.bindings.escape
    }
}

pub mod wasm {
    use super::*;
    use web_sys::MouseEvent;

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseMove {
            dx: e.movement_x() as f64,
            dy: e.movement_y() as f64,
        }
    }
}
