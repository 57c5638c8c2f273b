//! Mock implementation of RenderBackend for testing.
//!
//! This module provides a backend that records every operation without
//! drawing anything, so tests can assert on draw order and texture lifetimes.

use lucent_core::alloc::HashMap;
use lucent_render::{Color, Rect, RenderBackend, RenderError, RenderTarget, TextureId};
use lucent_render::error::RenderResult;
use parking_lot::Mutex;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Clear {
        target: RenderTarget,
        color: Color,
    },
    FilledRect {
        target: RenderTarget,
        rect: Rect<f32>,
        color: Color,
        corner_radius: f32,
    },
    BorderRect {
        target: RenderTarget,
        rect: Rect<f32>,
        color: Color,
        width: f32,
        corner_radius: f32,
    },
    CopyTexture {
        target: RenderTarget,
        texture: TextureId,
        dst: Rect<f32>,
        color_mod: [u8; 3],
        alpha_mod: u8,
    },
    CreatePixelTexture {
        id: TextureId,
        width: u32,
        height: u32,
    },
    CreateRenderTexture {
        id: TextureId,
        width: u32,
        height: u32,
    },
    DestroyTexture {
        id: TextureId,
    },
    SetRenderTarget {
        target: RenderTarget,
    },
}

impl RenderCall {
    /// The target the call drew into, for draw calls.
    pub fn target(&self) -> Option<RenderTarget> {
        match self {
            RenderCall::Clear { target, .. }
            | RenderCall::FilledRect { target, .. }
            | RenderCall::BorderRect { target, .. }
            | RenderCall::CopyTexture { target, .. } => Some(*target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MockTexture {
    width: u32,
    height: u32,
    render_target: bool,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RenderCall>,
    textures: HashMap<TextureId, MockTexture>,
    next_texture_id: u64,
    target: RenderTarget,
    fail_texture_creation: bool,
}

/// Mock implementation of [`RenderBackend`] for testing.
///
/// State lives behind a `Mutex` so inspection helpers take `&self`, the same
/// way [`RenderBackend::render_target`] does.
///
/// # Example
///
/// ```rust
/// use lucent_render::{Color, Rect, RenderBackend};
/// use lucent_test_utils::MockBackend;
///
/// let mut backend = MockBackend::new();
/// backend.draw_filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED, 0.0);
///
/// assert_eq!(backend.count_filled_rects(), 1);
/// assert_eq!(backend.live_textures(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent texture allocation fail.
    pub fn fail_texture_creation(&self, fail: bool) {
        self.state.lock().fail_texture_creation = fail;
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.state.lock().calls.clone()
    }

    /// Only the calls that drew something, in order.
    pub fn draw_calls(&self) -> Vec<RenderCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.target().is_some())
            .cloned()
            .collect()
    }

    pub fn count_filled_rects(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::FilledRect { .. }))
    }

    pub fn count_copies(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CopyTexture { .. }))
    }

    pub fn count_render_texture_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateRenderTexture { .. }))
    }

    pub fn count_pixel_texture_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreatePixelTexture { .. }))
    }

    pub fn count_destroys(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::DestroyTexture { .. }))
    }

    /// Textures created and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.state.lock().textures.len()
    }

    pub fn is_live(&self, texture: TextureId) -> bool {
        self.state.lock().textures.contains_key(&texture)
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    fn allocate(&self, width: u32, height: u32, render_target: bool) -> RenderResult<TextureId> {
        let mut state = self.state.lock();
        if state.fail_texture_creation {
            return Err(RenderError::TextureCreation("mock failure".to_string()));
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        state.next_texture_id += 1;
        let id = TextureId(state.next_texture_id);
        state.textures.insert(
            id,
            MockTexture {
                width,
                height,
                render_target,
            },
        );
        let call = if render_target {
            RenderCall::CreateRenderTexture { id, width, height }
        } else {
            RenderCall::CreatePixelTexture { id, width, height }
        };
        state.calls.push(call);
        Ok(id)
    }
}

impl RenderBackend for MockBackend {
    fn clear(&mut self, color: Color) {
        let state = self.state.get_mut();
        let target = state.target;
        state.calls.push(RenderCall::Clear { target, color });
    }

    fn draw_filled_rect(&mut self, rect: Rect<f32>, color: Color, corner_radius: f32) {
        let state = self.state.get_mut();
        let target = state.target;
        state.calls.push(RenderCall::FilledRect {
            target,
            rect,
            color,
            corner_radius,
        });
    }

    fn draw_border_rect(&mut self, rect: Rect<f32>, color: Color, width: f32, corner_radius: f32) {
        let state = self.state.get_mut();
        let target = state.target;
        state.calls.push(RenderCall::BorderRect {
            target,
            rect,
            color,
            width,
            corner_radius,
        });
    }

    fn copy_texture(
        &mut self,
        texture: TextureId,
        _src: Option<Rect<f32>>,
        dst: Rect<f32>,
        color_mod: [u8; 3],
        alpha_mod: u8,
    ) -> RenderResult<()> {
        let state = self.state.get_mut();
        if !state.textures.contains_key(&texture) {
            return Err(RenderError::UnknownTexture(texture));
        }
        let target = state.target;
        state.calls.push(RenderCall::CopyTexture {
            target,
            texture,
            dst,
            color_mod,
            alpha_mod,
        });
        Ok(())
    }

    fn create_texture_from_pixels(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> RenderResult<TextureId> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        self.allocate(width, height, false)
    }

    fn create_render_texture(&mut self, width: u32, height: u32) -> RenderResult<TextureId> {
        self.allocate(width, height, true)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        let state = self.state.get_mut();
        state.textures.remove(&texture);
        state.calls.push(RenderCall::DestroyTexture { id: texture });
    }

    fn set_render_target(&mut self, target: RenderTarget) -> RenderResult<()> {
        let state = self.state.get_mut();
        if let RenderTarget::Texture(id) = target {
            match state.textures.get(&id) {
                Some(texture) if texture.render_target => {}
                Some(texture) => {
                    return Err(RenderError::InvalidDimensions {
                        width: texture.width,
                        height: texture.height,
                    });
                }
                None => return Err(RenderError::UnknownTexture(id)),
            }
        }
        state.target = target;
        state.calls.push(RenderCall::SetRenderTarget { target });
        Ok(())
    }

    fn render_target(&self) -> RenderTarget {
        self.state.lock().target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_lifecycle() {
        let mut backend = MockBackend::new();
        let id = backend.create_render_texture(4, 4).unwrap();
        assert!(backend.is_live(id));
        backend.set_render_target(RenderTarget::Texture(id)).unwrap();
        backend.clear(Color::TRANSPARENT);
        assert_eq!(
            backend.draw_calls()[0].target(),
            Some(RenderTarget::Texture(id))
        );

        backend.set_render_target(RenderTarget::Default).unwrap();
        backend.destroy_texture(id);
        assert!(!backend.is_live(id));
        assert_eq!(backend.count_destroys(), 1);
    }

    #[test]
    fn test_pixel_buffer_is_validated() {
        let mut backend = MockBackend::new();
        let err = backend.create_texture_from_pixels(2, 2, &[0; 3]).unwrap_err();
        assert_eq!(
            err,
            RenderError::PixelBufferSize {
                expected: 16,
                actual: 3
            }
        );
    }

    #[test]
    fn test_copy_of_unknown_texture_fails() {
        let mut backend = MockBackend::new();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(backend.copy_texture(TextureId(99), None, rect, [255; 3], 255).is_err());
    }

    #[test]
    fn test_failure_toggle() {
        let mut backend = MockBackend::new();
        backend.fail_texture_creation(true);
        assert!(backend.create_render_texture(8, 8).is_err());
        backend.fail_texture_creation(false);
        assert!(backend.create_render_texture(8, 8).is_ok());
    }
}
