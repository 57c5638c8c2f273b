//! Builders for [`InputSnapshot`]s that read like a pointer script.

use lucent_core::math::Vec2;
use lucent_input::{ButtonState, InputSnapshot, KeyCode, KeyPress, Modifiers};

/// Cursor at `(x, y)` with no buttons held.
pub fn hover(x: f32, y: f32, timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot::at(Vec2::new(x, y), timestamp_ms)
}

/// Left button goes down at `(x, y)`.
pub fn press(x: f32, y: f32, timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot {
        left: ButtonState {
            is_down: true,
            presses: 1,
            releases: 0,
        },
        ..hover(x, y, timestamp_ms)
    }
}

/// Left button still down, no new transitions.
pub fn hold(x: f32, y: f32, timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot {
        left: ButtonState {
            is_down: true,
            presses: 0,
            releases: 0,
        },
        ..hover(x, y, timestamp_ms)
    }
}

/// Left button comes up at `(x, y)`.
pub fn release(x: f32, y: f32, timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot {
        left: ButtonState {
            is_down: false,
            presses: 0,
            releases: 1,
        },
        ..hover(x, y, timestamp_ms)
    }
}

/// Wheel notches at `(x, y)`; positive is up.
pub fn wheel(x: f32, y: f32, notches: i32, timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot {
        wheel_up: notches.max(0) as u32,
        wheel_down: (-notches).max(0) as u32,
        ..hover(x, y, timestamp_ms)
    }
}

/// Unmodified key presses with the cursor parked at the origin.
pub fn keys(codes: &[KeyCode], timestamp_ms: u64) -> InputSnapshot {
    InputSnapshot {
        keys: codes
            .iter()
            .map(|code| KeyPress::new(*code, Modifiers::empty()))
            .collect(),
        ..hover(-1.0, -1.0, timestamp_ms)
    }
}
