//! Built-in leaf widgets.

mod button;
mod image;
mod label;
mod slider;
mod toggle;

pub use button::Button;
pub use image::Image;
pub use label::{Label, TextRole};
pub use slider::Slider;
pub use toggle::Toggle;
