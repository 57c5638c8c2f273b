//! Lucent Input
//!
//! Folds raw device events into one [`InputSnapshot`] per frame. The widget
//! core never sees individual OS events, only these snapshots.
//!
//! ```
//! use lucent_input::{InputSystem, MouseButton};
//! use lucent_core::math::Vec2;
//!
//! let mut input = InputSystem::new();
//! input.mouse_moved(Vec2::new(12.0, 8.0));
//! input.mouse_button(MouseButton::Left, true);
//! input.mouse_button(MouseButton::Left, false);
//!
//! let frame = input.snapshot(16);
//! assert_eq!(frame.left.presses, 1);
//! assert_eq!(frame.left.releases, 1);
//! assert!(!frame.left.is_down);
//! ```

mod keys;
mod snapshot;
mod system;
#[cfg(feature = "winit")]
mod winit_events;

pub use keys::{KeyCode, KeyPress, Modifiers};
pub use snapshot::{ButtonState, InputSnapshot, MouseButton};
pub use system::InputSystem;
