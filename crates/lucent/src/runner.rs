use std::time::Duration;

use lucent_core::profiling::{new_frame, profile_function};
use lucent_input::InputSnapshot;
use lucent_render::{RenderBackend, RenderTarget};
use lucent_ui::WidgetTree;

use crate::time::FrameClock;

/// Drives one [`WidgetTree`] through its per-frame passes.
///
/// Each frame runs input dispatch, then update, then draw. Structural changes
/// queued by input callbacks are applied by the update's `sync`, so the frame
/// that reacts to a click also draws its result.
#[derive(Debug)]
pub struct UiRunner {
    tree: WidgetTree,
    clock: FrameClock,
    target: RenderTarget,
}

impl UiRunner {
    pub fn new(tree: WidgetTree) -> Self {
        Self {
            tree,
            clock: FrameClock::new(),
            target: RenderTarget::Default,
        }
    }

    /// Draw into `target` instead of the default framebuffer.
    pub fn with_target(mut self, target: RenderTarget) -> Self {
        self.target = target;
        self
    }

    /// Run a frame timed by the wall clock. Returns the elapsed milliseconds
    /// handed to the tree.
    pub fn frame(&mut self, input: &InputSnapshot, backend: &mut dyn RenderBackend) -> i64 {
        let elapsed = self.clock.tick();
        self.run_passes(input, elapsed, backend);
        elapsed
    }

    /// Run a frame with an explicit delta.
    pub fn frame_with_elapsed(
        &mut self,
        input: &InputSnapshot,
        delta: Duration,
        backend: &mut dyn RenderBackend,
    ) -> i64 {
        let elapsed = self.clock.advance(delta);
        self.run_passes(input, elapsed, backend);
        elapsed
    }

    fn run_passes(&mut self, input: &InputSnapshot, elapsed: i64, backend: &mut dyn RenderBackend) {
        new_frame();
        profile_function!();
        self.tree.process_input(input);
        self.tree.update(elapsed);
        self.tree.draw(backend, self.target);
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn into_tree(self) -> WidgetTree {
        self.tree
    }
}
