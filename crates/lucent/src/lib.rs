//! Lucent - a retained-mode 2D widget toolkit
//!
//! This crate ties the pieces together:
//!
//! - **Widget tree** (`lucent-ui`): panels, z-ordered children, animated
//!   positions and colors, click and long-press dispatch
//! - **Drawing contract** (`lucent-render`): the backend trait widgets draw through
//! - **Input** (`lucent-input`): per-frame input snapshots
//! - **Runtime**: a frame clock, a background task pool and a frame runner
//!
//! # Quick Start
//!
//! ```no_run
//! use lucent::prelude::*;
//!
//! # fn backend() -> Box<dyn RenderBackend> { unimplemented!() }
//! lucent::init(&Config::default());
//!
//! let mut tree = WidgetTree::new(Theme::dark());
//! tree.set_viewport_size(800.0, 600.0);
//! let root = tree.root();
//! tree.add_widget(root, Button::new("Play"), 20.0, 20.0, 0);
//!
//! let mut runner = UiRunner::new(tree);
//! let mut backend = backend();
//! let mut input = InputSystem::new();
//! loop {
//!     let snapshot = input.snapshot(runner.clock().elapsed_ms());
//!     runner.frame(&snapshot, backend.as_mut());
//! }
//! ```

pub mod runner;
pub mod task_pool;
pub mod time;

pub use lucent_core as core;
pub use lucent_core::math;
pub use lucent_input as input;
pub use lucent_render as render;
pub use lucent_ui as ui;

pub use lucent_core::{Config, ProfilingMode};
pub use runner::UiRunner;
pub use task_pool::TaskPool;
pub use time::FrameClock;

use lucent_core::profiling::{ProfilingBackend, init_profiling};

/// Install logging and, if requested, the profiler server.
pub fn init(config: &Config) {
    lucent_core::logging::init_with_filter(&config.log_filter);
    if config.profiling == ProfilingMode::WithWebserver {
        init_profiling(ProfilingBackend::PuffinHttp);
    }
    tracing::debug!(filter = %config.log_filter, profiling = ?config.profiling, "lucent initialized");
}

pub mod prelude {
    pub use crate::{Config, FrameClock, ProfilingMode, TaskPool, UiRunner};

    pub use lucent_core::geometry::{Rect, Size};
    pub use lucent_core::math::Vec2;
    pub use lucent_input::{InputSnapshot, InputSystem, KeyCode, MouseButton};
    pub use lucent_render::{Color, RenderBackend, RenderTarget};
    pub use lucent_ui::{
        AnimatedColor, AnimatedPosition, Button, EventKind, Image, Label, Panel, Slider, TextRole, Theme,
        Toggle, Widget, WidgetEvent, WidgetHandle, WidgetHooks, WidgetTree,
    };
}
