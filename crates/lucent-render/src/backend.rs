//! The drawing surface the widget core renders through.

use crate::{Color, Rect, error::RenderResult};

/// Opaque handle to a backend texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Where draw calls land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderTarget {
    /// The window's default framebuffer.
    #[default]
    Default,
    /// An offscreen texture created with [`RenderBackend::create_render_texture`].
    Texture(TextureId),
}

/// Hardware-accelerated 2D drawing surface plus texture cache.
///
/// Rectangles are in target pixels. `corner_radius` of `0.0` means square
/// corners; a rounded shape is always a single primitive so translucent
/// colors are blended exactly once per pixel.
pub trait RenderBackend {
    /// Clear the current render target.
    fn clear(&mut self, color: Color);

    fn draw_filled_rect(&mut self, rect: Rect<f32>, color: Color, corner_radius: f32);

    /// Stroke `width` pixels inward from the edges of `rect`.
    fn draw_border_rect(&mut self, rect: Rect<f32>, color: Color, width: f32, corner_radius: f32);

    /// Blit `src` (or the whole texture when `None`) into `dst`, multiplying by
    /// `color_mod` and `alpha_mod`.
    fn copy_texture(
        &mut self,
        texture: TextureId,
        src: Option<Rect<f32>>,
        dst: Rect<f32>,
        color_mod: [u8; 3],
        alpha_mod: u8,
    ) -> RenderResult<()>;

    /// Upload tightly packed RGBA8 pixels.
    fn create_texture_from_pixels(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> RenderResult<TextureId>;

    /// Allocate a texture usable as a render target.
    fn create_render_texture(&mut self, width: u32, height: u32) -> RenderResult<TextureId>;

    fn destroy_texture(&mut self, texture: TextureId);

    /// Redirect subsequent draws.
    fn set_render_target(&mut self, target: RenderTarget) -> RenderResult<()>;

    fn render_target(&self) -> RenderTarget;
}
