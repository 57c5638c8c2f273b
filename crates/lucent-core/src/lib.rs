//! Lucent Core
//!
//! Shared plumbing for the Lucent widget toolkit: logging and profiling
//! bootstrap, engine configuration, hash collections, the generational arena
//! that backs the widget tree, and small geometry/math types.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{Config, ProfilingMode};
