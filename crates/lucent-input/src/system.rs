use lucent_core::math::Vec2;

use crate::{ButtonState, InputSnapshot, KeyCode, KeyPress, Modifiers, MouseButton};

/// Accumulates device events between frames.
#[derive(Debug, Default)]
pub struct InputSystem {
    mouse_pos: Vec2,
    left: ButtonState,
    right: ButtonState,
    wheel_up: u32,
    wheel_down: u32,
    keys: Vec<KeyPress>,
    modifiers: Modifiers,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse_moved(&mut self, pos: Vec2) {
        self.mouse_pos = pos;
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let state = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
        };
        // Repeated presses without a release come from focus changes; count them once.
        if pressed && !state.is_down {
            state.presses += 1;
        } else if !pressed && state.is_down {
            state.releases += 1;
        }
        state.is_down = pressed;
    }

    /// Positive `delta_y` scrolls up. Fractional deltas round away from zero so
    /// a touchpad nudge still counts as one notch.
    pub fn mouse_wheel(&mut self, delta_y: f32) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let notches = delta_y.abs().ceil() as u32;
        if delta_y > 0.0 {
            self.wheel_up += notches;
        } else {
            self.wheel_down += notches;
        }
    }

    pub fn modifiers_changed(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key_pressed(&mut self, code: KeyCode) {
        self.keys.push(KeyPress::new(code, self.modifiers));
    }

    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Hand out the state accumulated since the last call and reset the
    /// per-frame counters. Held buttons stay held.
    pub fn snapshot(&mut self, timestamp_ms: u64) -> InputSnapshot {
        let snapshot = InputSnapshot {
            mouse_pos: self.mouse_pos,
            left: self.left,
            right: self.right,
            wheel_up: self.wheel_up,
            wheel_down: self.wheel_down,
            keys: std::mem::take(&mut self.keys),
            timestamp_ms,
        };

        for state in [&mut self.left, &mut self.right] {
            state.presses = 0;
            state.releases = 0;
        }
        self.wheel_up = 0;
        self.wheel_down = 0;

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_resets_transitions_but_keeps_held_buttons() {
        let mut input = InputSystem::new();
        input.mouse_button(MouseButton::Left, true);

        let first = input.snapshot(0);
        assert!(first.left.is_down);
        assert_eq!(first.left.presses, 1);

        let second = input.snapshot(16);
        assert!(second.left.is_down);
        assert_eq!(second.left.presses, 0);
    }

    #[test]
    fn test_duplicate_press_counts_once() {
        let mut input = InputSystem::new();
        input.mouse_button(MouseButton::Right, true);
        input.mouse_button(MouseButton::Right, true);
        assert_eq!(input.snapshot(0).right.presses, 1);
    }

    #[test]
    fn test_wheel_notches() {
        let mut input = InputSystem::new();
        input.mouse_wheel(0.3);
        input.mouse_wheel(-2.0);
        let frame = input.snapshot(0);
        assert_eq!(frame.wheel_up, 1);
        assert_eq!(frame.wheel_down, 2);
    }

    #[test]
    fn test_keys_capture_modifiers() {
        let mut input = InputSystem::new();
        input.modifiers_changed(Modifiers::SHIFT | Modifiers::CTRL);
        input.key_pressed(KeyCode::Character('a'));
        input.modifiers_changed(Modifiers::empty());
        input.key_pressed(KeyCode::Enter);

        let frame = input.snapshot(0);
        assert_eq!(frame.keys.len(), 2);
        assert!(frame.keys[0].shift() && frame.keys[0].ctrl());
        assert!(!frame.keys[1].shift());
        assert!(input.snapshot(1).keys.is_empty());
    }
}
