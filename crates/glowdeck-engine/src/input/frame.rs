use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, TextEvent};

/// Per-frame input deltas.
///
/// [`InputState`](super::InputState) holds the current state (held buttons,
/// pointer position); this holds what changed during the frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Text committed this frame, in arrival order.
    pub text: Vec<TextEvent>,

    /// Accumulated pointer movement this frame, in logical pixels.
    pub pointer_delta: (f32, f32),

    /// Accumulated vertical wheel scroll this frame, in lines.
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.text.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel_lines = 0.0;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
