//! Font collaborator contract.
//!
//! Glyph metrics and rasterization are external; widgets only measure strings
//! and ask for an RGBA bitmap they can upload as a texture.

use crate::{Size, error::RenderResult};

/// Tightly packed RGBA8 bitmap of a rendered string.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedText {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub trait FontProvider: Send + Sync {
    /// Extent of `text` at `font_size`, in pixels.
    fn measure(&self, text: &str, font_size: f32) -> Size<f32>;

    fn rasterize(&self, text: &str, font_size: f32) -> RenderResult<RasterizedText>;
}
