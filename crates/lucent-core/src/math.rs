//! Vector math re-exported from [`glam`].
//!
//! Widgets keep their own `f32` coordinates; `Vec2` is used wherever a point or
//! offset is passed around as a unit (cursor positions, draw origins).
//!
//! ```
//! use lucent_core::math::Vec2;
//!
//! let origin = Vec2::new(10.0, 20.0);
//! let child = origin + Vec2::new(5.0, 5.0);
//! assert_eq!(child, Vec2::new(15.0, 25.0));
//! ```

pub use glam::{Vec2, Vec4, vec2, vec4};

/// Packed 2D vector with a guaranteed `#[repr(C)]` layout for backend uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVec2 {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for PackedVec2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}
