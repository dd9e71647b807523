use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for the window.
///
/// Holds "is down" information and the current pointer position; per-frame
/// transitions are recorded into an [`InputFrame`].
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies one event to the current state and records deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Clear "down" sets on focus loss so nothing gets stuck
                    // pressed across a focus change.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.wheel_lines += delta.lines_y();
            }

            InputEvent::Text(t) => {
                frame.text.push(t.clone());
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn repeated_press_records_one_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 1.0, 1.0));
        state.apply_event(&mut frame, press(MouseButton::Left, 2.0, 2.0));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(frame.buttons_pressed.len(), 1);
    }

    #[test]
    fn pointer_delta_accumulates_across_moves() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for (x, y) in [(10.0, 10.0), (13.0, 10.0), (13.0, 14.0)] {
            state.apply_event(
                &mut frame,
                InputEvent::PointerMoved(PointerMoveEvent { x, y }),
            );
        }
        // First move has no previous position, so only the later two count.
        assert_eq!(frame.pointer_delta, (3.0, 4.0));
    }

    #[test]
    fn focus_loss_clears_down_sets() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn wheel_lines_accumulate() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let ev = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.5 },
            modifiers: Modifiers::default(),
        };
        state.apply_event(&mut frame, ev.clone());
        state.apply_event(&mut frame, ev);
        assert_eq!(frame.wheel_lines, 3.0);
    }
}
