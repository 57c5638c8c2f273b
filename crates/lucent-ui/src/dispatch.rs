//! Routing one frame of input through the tree.

use lucent_core::math::Vec2;
use lucent_core::profiling::profile_function;
use lucent_input::{InputSnapshot, KeyPress};

use crate::event::WidgetEvent;
use crate::pointer::{MouseState, PointerEvents};
use crate::theme::Timing;
use crate::tree::WidgetTree;
use crate::widget::{InputCtx, WidgetHandle};

impl WidgetTree {
    /// Deliver one frame of input.
    ///
    /// Every widget sees the pointer exactly once. Within a panel only the
    /// topmost child under the cursor is entered; children run before their
    /// parent, and a wheel consumed by a child is zeroed for everything
    /// processed after it. Keys then go to the focused widget (or the root)
    /// and bubble up through its ancestors until one consumes them.
    pub fn process_input(&mut self, input: &InputSnapshot) {
        profile_function!();
        let timing = self.theme.timing;
        let root = self.root;
        self.dispatch_mouse(root, input, &timing, true, true);

        if let Some(focus) = self.pending_focus.take() {
            self.set_keyboard_focus(Some(focus));
        }
        for key in &input.keys {
            self.dispatch_key(*key);
        }
    }

    /// Returns whether this subtree consumed the wheel.
    fn dispatch_mouse(
        &mut self,
        handle: WidgetHandle,
        input: &InputSnapshot,
        timing: &Timing,
        candidate: bool,
        wheel_available: bool,
    ) -> bool {
        self.sort_children(handle);
        let (children, entered, screen_pos) = {
            let Some(node) = self.nodes.get_mut(handle.key()) else {
                return false;
            };
            let base = &mut node.widget.base;
            if base.is_destroyed() {
                return false;
            }
            if !base.is_visible || base.is_input_suspended {
                base.pointer.reset();
                return false;
            }
            let entered = candidate
                && base.has_screen_position()
                && base.screen_rect().contains(input.mouse_pos);
            let children = node
                .widget
                .panel
                .as_ref()
                .map(|panel| panel.children.clone())
                .unwrap_or_default();
            (children, entered, node.widget.base.screen_pos())
        };

        let mut claimed = false;
        let mut wheel_consumed = false;
        for child in children.into_iter().rev() {
            let hit = entered && !claimed && self.accepts_pointer(child, input.mouse_pos);
            claimed |= hit;
            if self.dispatch_mouse(child, input, timing, hit, wheel_available && !wheel_consumed) {
                wheel_consumed = true;
            }
        }

        let wheel = wheel_available && !wheel_consumed;
        let mut state = MouseState {
            pos: input.mouse_pos,
            local: input.mouse_pos - screen_pos,
            is_entered: entered,
            left: input.left,
            right: input.right,
            wheel_up: if wheel { input.wheel_up } else { 0 },
            wheel_down: if wheel { input.wheel_down } else { 0 },
            timestamp_ms: input.timestamp_ms,
            ..Default::default()
        };

        let Some(node) = self.nodes.get_mut(handle.key()) else {
            return wheel_consumed;
        };
        let widget = &mut node.widget;
        widget.base.pointer.track(&mut state, timing);

        for event in state.events.widget_events() {
            widget.base.callbacks.emit(handle, event, &mut self.commands);
        }
        if state.events.contains(PointerEvents::PRESS)
            && widget.base.is_keyboard_focus_enabled
            && self.pending_focus.is_none()
        {
            self.pending_focus = Some(handle);
        }

        let mut emitted = Vec::new();
        let (mut parts, kind) = widget.split();
        let mut ctx = InputCtx {
            handle,
            theme: &self.theme,
            commands: &mut self.commands,
            emitted: &mut emitted,
        };
        let consumed = kind.mouse(&mut parts, &state, &mut ctx);
        for event in emitted {
            widget.base.callbacks.emit(handle, event, &mut self.commands);
        }

        wheel_consumed || (consumed && state.has_wheel())
    }

    fn accepts_pointer(&self, handle: WidgetHandle, point: Vec2) -> bool {
        self.base(handle).is_some_and(|base| {
            !base.is_destroyed()
                && base.is_visible
                && !base.is_input_suspended
                && base.has_screen_position()
                && base.screen_rect().contains(point)
        })
    }

    /// Returns whether some widget consumed the key.
    pub fn dispatch_key(&mut self, key: KeyPress) -> bool {
        let start = self
            .focus
            .filter(|focus| self.is_live(*focus))
            .unwrap_or(self.root);

        let mut current = Some(start);
        while let Some(handle) = current {
            if self.deliver_key(handle, key) {
                tracing::trace!(%handle, ?key, "key consumed");
                return true;
            }
            current = self.parent(handle);
        }
        false
    }

    fn deliver_key(&mut self, handle: WidgetHandle, key: KeyPress) -> bool {
        let Some(node) = self.nodes.get_mut(handle.key()) else {
            return false;
        };
        let widget = &mut node.widget;
        let base = &widget.base;
        if base.is_destroyed() || !base.is_visible || base.is_input_suspended {
            return false;
        }

        let mut emitted = Vec::new();
        let (mut parts, kind) = widget.split();
        let mut ctx = InputCtx {
            handle,
            theme: &self.theme,
            commands: &mut self.commands,
            emitted: &mut emitted,
        };
        let mut consumed = kind.key(&mut parts, key, &mut ctx);
        for event in emitted {
            widget.base.callbacks.emit(handle, event, &mut self.commands);
        }
        if !consumed {
            consumed = widget
                .base
                .callbacks
                .emit(handle, WidgetEvent::KeyPressed(key), &mut self.commands)
                > 0;
        }
        consumed
    }
}
