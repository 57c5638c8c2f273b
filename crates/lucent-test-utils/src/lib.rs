//! Test utilities for Lucent.
//!
//! This crate provides testing infrastructure for the Lucent widget toolkit:
//! recording stand-ins for the render collaborators and builders for
//! per-frame input.
//!
//! # Overview
//!
//! - `MockBackend` - [`RenderBackend`](lucent_render::RenderBackend) that
//!   records calls and tracks live textures (requires `mock` feature)
//! - `MockFonts` / `MockSprites` - deterministic font metrics and an
//!   in-memory sprite table (requires `mock` feature)
//! - [`input`] - `press`, `hold`, `release`, `wheel` and `keys` snapshots
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use lucent_render::{FontProvider, RenderBackend};
//! use lucent_test_utils::{MockBackend, MockFonts};
//!
//! let fonts = MockFonts::new();
//! let text = fonts.rasterize("hi", 12.0).unwrap();
//!
//! let mut backend = MockBackend::new();
//! let texture = backend
//!     .create_texture_from_pixels(text.width, text.height, &text.pixels)
//!     .unwrap();
//!
//! assert!(backend.is_live(texture));
//! assert_eq!(backend.count_pixel_texture_creates(), 1);
//! # }
//! ```

pub mod input;
#[cfg(feature = "mock")]
pub mod mock_assets;
#[cfg(feature = "mock")]
pub mod mock_render;

#[cfg(feature = "mock")]
pub use mock_assets::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
