use std::sync::atomic::{AtomicU64, Ordering};

use lucent_core::geometry::{Rect, Size};
use lucent_core::math::Vec2;

use crate::animation::AnimatedPosition;
use crate::event::Callbacks;
use crate::pointer::PointerTracker;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique widget identity. Unlike a [`WidgetHandle`](super::WidgetHandle)
/// it is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// State every widget carries regardless of its kind.
#[derive(Debug)]
pub struct WidgetBase {
    id: WidgetId,
    name: Option<String>,
    /// Offset from the parent's top-left corner.
    pub position: AnimatedPosition,
    width: f32,
    height: f32,
    pub(crate) z_level: i32,
    screen_pos: Vec2,
    has_screen_position: bool,
    is_destroyed: bool,
    pub is_visible: bool,
    /// Skip input dispatch for this widget and its subtree.
    pub is_input_suspended: bool,
    /// Eligible for hover-filtered hit tests.
    pub is_mouse_hover_enabled: bool,
    /// Pressing this widget moves keyboard focus to it.
    pub is_keyboard_focus_enabled: bool,
    destroy_delay_ms: Option<i64>,
    fixed_center: Option<Vec2>,
    size_changed: bool,
    /// Offset and visibility as of the last update pass.
    was_at: Vec2,
    was_visible: bool,
    redraw_requested: bool,
    pub(crate) pointer: PointerTracker,
    pub(crate) callbacks: Callbacks,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            name: None,
            position: AnimatedPosition::default(),
            width: 0.0,
            height: 0.0,
            z_level: 0,
            screen_pos: Vec2::ZERO,
            has_screen_position: false,
            is_destroyed: false,
            is_visible: true,
            is_input_suspended: false,
            is_mouse_hover_enabled: true,
            is_keyboard_focus_enabled: false,
            destroy_delay_ms: None,
            fixed_center: None,
            size_changed: false,
            was_at: Vec2::ZERO,
            was_visible: true,
            redraw_requested: false,
            pointer: PointerTracker::default(),
            callbacks: Callbacks::default(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Size<f32> {
        Size::new(self.width, self.height)
    }

    /// Set the extent. Negative and non-finite values become zero.
    ///
    /// With a fixed center enabled, the position is re-assigned so the
    /// remembered center stays put.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.size_changed = true;
        self.redraw_requested = true;

        if let Some(center) = self.fixed_center {
            self.position
                .assign(center.x - width / 2.0, center.y - height / 2.0);
        }
    }

    /// Keep the current center fixed across future size changes.
    pub fn set_fixed_center(&mut self, enable: bool) {
        self.fixed_center = enable.then(|| {
            Vec2::new(
                self.position.x() + self.width / 2.0,
                self.position.y() + self.height / 2.0,
            )
        });
    }

    pub fn is_fixed_center(&self) -> bool {
        self.fixed_center.is_some()
    }

    pub fn z_level(&self) -> i32 {
        self.z_level
    }

    /// Absolute position, as of the last update pass.
    pub fn screen_pos(&self) -> Vec2 {
        self.screen_pos
    }

    pub fn screen_rect(&self) -> Rect<f32> {
        Rect::new(self.screen_pos.x, self.screen_pos.y, self.width, self.height)
    }

    /// False until the widget has gone through one update with an origin.
    pub fn has_screen_position(&self) -> bool {
        self.has_screen_position
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }

    /// Mark for removal at the next sweep.
    pub fn destroy(&mut self) {
        self.is_destroyed = true;
    }

    /// Mark for removal once `delay_ms` of updates have elapsed.
    /// A non-positive delay destroys immediately.
    pub fn set_destroy_delay(&mut self, delay_ms: i64) {
        if delay_ms <= 0 {
            self.destroy();
        } else {
            self.destroy_delay_ms = Some(delay_ms);
        }
    }

    pub fn destroy_delay(&self) -> Option<i64> {
        self.destroy_delay_ms
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Position, screen coordinates and destroy timer, in that order.
    pub(crate) fn update(&mut self, elapsed_ms: i64, origin: Vec2) {
        self.position.update(elapsed_ms);
        let at = self.position.as_vec2();
        if at != self.was_at {
            self.was_at = at;
            self.redraw_requested = true;
        }
        if self.is_visible != self.was_visible {
            self.was_visible = self.is_visible;
            self.redraw_requested = true;
        }
        self.screen_pos = origin + self.position.as_vec2();
        self.has_screen_position = true;

        if let Some(remaining) = self.destroy_delay_ms.as_mut() {
            *remaining -= elapsed_ms;
            if *remaining <= 0 {
                self.destroy_delay_ms = None;
                self.is_destroyed = true;
            }
        }
    }

    /// Ask cached ancestors to re-render, for appearance changes the tree
    /// cannot see (a leaf's own colors or text, a custom widget's state).
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Whether anything affecting this widget's pixels changed since the last call.
    pub(crate) fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Whether the extent changed since the last call.
    pub(crate) fn take_size_changed(&mut self) -> bool {
        std::mem::take(&mut self.size_changed)
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
