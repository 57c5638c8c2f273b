//! Mock sprite and font collaborators.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lucent_core::alloc::HashMap;
use lucent_render::error::RenderResult;
use lucent_render::{FontProvider, RasterizedText, RenderError, Size, Sprite, SpriteCache, TextureId};
use parking_lot::RwLock;

/// In-memory [`SpriteCache`] keyed by `(path, frame)`.
#[derive(Debug, Default)]
pub struct MockSprites {
    sprites: RwLock<HashMap<(String, u32), Sprite>>,
    lookups: AtomicUsize,
}

impl MockSprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame. The texture id is synthetic; pair it with a texture
    /// created on the backend if the test blits it.
    pub fn insert(&self, path: impl Into<String>, frame: u32, sprite: Sprite) {
        self.sprites.write().insert((path.into(), frame), sprite);
    }

    pub fn with(self, path: impl Into<String>, frame: u32, texture: TextureId, width: u32, height: u32) -> Self {
        self.insert(
            path,
            frame,
            Sprite {
                texture,
                width,
                height,
            },
        );
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl SpriteCache for MockSprites {
    fn sprite(&self, path: &str, frame: u32) -> Option<Sprite> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.sprites.read().get(&(path.to_string(), frame)).copied()
    }
}

/// Monospace [`FontProvider`]: every character is half the font size wide
/// and a line is exactly one font size tall.
#[derive(Debug, Default)]
pub struct MockFonts {
    fail_rasterize: AtomicBool,
    rasterized: AtomicUsize,
}

impl MockFonts {
    pub const ADVANCE: f32 = 0.5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent rasterization fail.
    pub fn fail_rasterize(&self, fail: bool) {
        self.fail_rasterize.store(fail, Ordering::Relaxed);
    }

    /// Number of successful rasterizations so far.
    pub fn rasterized(&self) -> usize {
        self.rasterized.load(Ordering::Relaxed)
    }
}

impl FontProvider for MockFonts {
    fn measure(&self, text: &str, font_size: f32) -> Size<f32> {
        let chars = text.chars().count() as f32;
        Size::new(chars * font_size * Self::ADVANCE, font_size)
    }

    fn rasterize(&self, text: &str, font_size: f32) -> RenderResult<RasterizedText> {
        if self.fail_rasterize.load(Ordering::Relaxed) {
            return Err(RenderError::Rasterization(format!("mock failure for {text:?}")));
        }
        let extent = self.measure(text, font_size);
        let width = (extent.width.ceil() as u32).max(1);
        let height = (extent.height.ceil() as u32).max(1);
        self.rasterized.fetch_add(1, Ordering::Relaxed);
        Ok(RasterizedText {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 4],
        })
    }
}
