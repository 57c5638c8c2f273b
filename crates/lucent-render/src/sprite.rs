use crate::backend::TextureId;

/// A resolved sprite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Sprite lookup by logical path and frame index.
///
/// Loading and decoding happen outside the widget core; the cache only has to
/// answer whether a frame is available right now.
pub trait SpriteCache: Send + Sync {
    fn sprite(&self, path: &str, frame: u32) -> Option<Sprite>;
}
