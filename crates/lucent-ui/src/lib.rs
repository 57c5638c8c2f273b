//! Lucent UI
//!
//! A retained-mode widget tree:
//! - Arena-owned widgets addressed by copyable [`WidgetHandle`]s, with
//!   explicit reference counts for handles held outside the tree
//! - [`Panel`] containers with z-ordering, staged insertion, hit testing and
//!   an optional render-to-texture cache
//! - Time-based [`AnimatedPosition`] and [`AnimatedColor`] primitives
//! - Pointer and keyboard dispatch that synthesizes clicks, long presses and
//!   drags per widget
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use lucent_core::math::Vec2;
//! use lucent_input::{ButtonState, InputSnapshot};
//! use lucent_ui::{EventKind, Theme, Widget, WidgetTree};
//!
//! let mut tree = WidgetTree::new(Theme::dark());
//! tree.set_viewport_size(800.0, 600.0);
//!
//! let root = tree.root();
//! let card = tree
//!     .add_widget(root, Widget::panel().sized(200.0, 100.0), 10.0, 10.0, 0)
//!     .unwrap();
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let counter = clicks.clone();
//! tree.on(card, EventKind::Click, move |_| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//! tree.update(16);
//!
//! let cursor = Vec2::new(50.0, 50.0);
//! tree.process_input(&InputSnapshot {
//!     left: ButtonState { is_down: true, presses: 1, releases: 0 },
//!     ..InputSnapshot::at(cursor, 0)
//! });
//! tree.process_input(&InputSnapshot {
//!     left: ButtonState { is_down: false, presses: 0, releases: 1 },
//!     ..InputSnapshot::at(cursor, 80)
//! });
//! assert_eq!(clicks.load(Ordering::Relaxed), 1);
//! ```

pub mod animation;
pub mod commands;
mod dispatch;
pub mod event;
mod frame;
pub mod panel;
pub mod pointer;
pub mod theme;
pub mod tree;
pub mod widget;
pub mod widgets;

pub use animation::{AnimatedColor, AnimatedPosition, QueuedMove};
pub use commands::{Commands, TreeOp, TreeProxy};
pub use event::{Callbacks, EventCallback, EventCtx, EventKind, WidgetEvent};
pub use panel::{Border, DropShadow, Panel};
pub use pointer::{MouseState, PointerEvents};
pub use theme::{ColorPalette, Spacing, Theme, ThemeBuilder, Timing, Typography};
pub use tree::{ReleaseOutcome, WidgetTree};
pub use widget::{
    DrawCtx, InputCtx, Parts, RefreshCtx, Services, UpdateCtx, Widget, WidgetBase, WidgetHandle,
    WidgetHooks, WidgetId, WidgetKind, WidgetType,
};
pub use widgets::{Button, Image, Label, Slider, TextRole, Toggle};
