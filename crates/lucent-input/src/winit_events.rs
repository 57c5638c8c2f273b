//! Mapping from winit window events.

use lucent_core::math::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::{InputSystem, KeyCode, Modifiers, MouseButton};

/// Pixels per wheel notch when a device reports pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

impl InputSystem {
    /// Feed a winit window event. Returns `true` when the event was relevant to input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_moved(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    _ => return false,
                };
                self.mouse_button(button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
                };
                self.mouse_wheel(dy);
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                let mut mods = Modifiers::empty();
                mods.set(Modifiers::SHIFT, state.shift_key());
                mods.set(Modifiers::CTRL, state.control_key());
                mods.set(Modifiers::ALT, state.alt_key());
                mods.set(Modifiers::SUPER, state.super_key());
                self.modifiers_changed(mods);
                true
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match map_key(&event.logical_key) {
                    Some(code) => {
                        self.key_pressed(code);
                        true
                    }
                    None => {
                        tracing::trace!("unmapped key: {:?}", event.logical_key);
                        false
                    }
                }
            }
            _ => false,
        }
    }
}

fn map_key(key: &Key) -> Option<KeyCode> {
    match key {
        Key::Character(text) => text.chars().next().map(KeyCode::Character),
        Key::Named(named) => Some(match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Space => KeyCode::Space,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,
            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,
            NamedKey::F1 => KeyCode::F(1),
            NamedKey::F2 => KeyCode::F(2),
            NamedKey::F3 => KeyCode::F(3),
            NamedKey::F4 => KeyCode::F(4),
            NamedKey::F5 => KeyCode::F(5),
            NamedKey::F6 => KeyCode::F(6),
            NamedKey::F7 => KeyCode::F(7),
            NamedKey::F8 => KeyCode::F(8),
            NamedKey::F9 => KeyCode::F(9),
            NamedKey::F10 => KeyCode::F(10),
            NamedKey::F11 => KeyCode::F(11),
            NamedKey::F12 => KeyCode::F(12),
            _ => return None,
        }),
        _ => None,
    }
}
