//! Lucent Render
//!
//! The drawing contract the widget core depends on. Nothing in here talks to a
//! GPU: concrete backends (and the mock in `lucent-test-utils`) implement
//! [`RenderBackend`], [`SpriteCache`] and [`FontProvider`].
//!
//! ```
//! use lucent_render::Color;
//!
//! let accent = Color::from_hex(0x3C78C8);
//! assert_eq!(accent.to_rgba_u8(), [60, 120, 200, 255]);
//! ```

pub mod backend;
pub mod color;
pub mod error;
pub mod sprite;
pub mod text;

pub use backend::{RenderBackend, RenderTarget, TextureId};
pub use color::Color;
pub use error::RenderError;
pub use sprite::{Sprite, SpriteCache};
pub use text::{FontProvider, RasterizedText};

pub use lucent_core::geometry::{Rect, Size};
