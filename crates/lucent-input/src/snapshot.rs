use lucent_core::math::Vec2;

use crate::KeyPress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Button state for one frame.
///
/// `presses` and `releases` count transitions since the previous snapshot, so
/// a press and release inside one frame is still visible as a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub is_down: bool,
    pub presses: u32,
    pub releases: u32,
}

impl ButtonState {
    pub fn was_pressed(&self) -> bool {
        self.presses > 0
    }

    pub fn was_released(&self) -> bool {
        self.releases > 0
    }
}

/// Device state for one frame, in screen pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSnapshot {
    pub mouse_pos: Vec2,
    pub left: ButtonState,
    pub right: ButtonState,
    /// Wheel notches toward the user's "up" since the previous snapshot.
    pub wheel_up: u32,
    pub wheel_down: u32,
    /// Key presses in arrival order.
    pub keys: Vec<KeyPress>,
    /// Monotonic milliseconds, used for long-press timing.
    pub timestamp_ms: u64,
}

impl InputSnapshot {
    /// Snapshot with only a cursor position and timestamp.
    pub fn at(mouse_pos: Vec2, timestamp_ms: u64) -> Self {
        Self {
            mouse_pos,
            timestamp_ms,
            ..Default::default()
        }
    }

    pub fn has_wheel(&self) -> bool {
        self.wheel_up > 0 || self.wheel_down > 0
    }
}
