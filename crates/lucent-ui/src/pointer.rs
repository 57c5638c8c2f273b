//! Per-widget pointer state and click/long-press/drag synthesis.

use bitflags::bitflags;
use lucent_core::math::Vec2;
use lucent_input::ButtonState;

use crate::event::WidgetEvent;
use crate::theme::Timing;

bitflags! {
    /// Transitions synthesized for one widget in one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerEvents: u16 {
        const ENTER = 1 << 0;
        const EXIT = 1 << 1;
        const PRESS = 1 << 2;
        const RELEASE = 1 << 3;
        const CLICK = 1 << 4;
        const LONG_PRESS = 1 << 5;
        const DRAG_START = 1 << 6;
        const DRAG_END = 1 << 7;
    }
}

impl PointerEvents {
    /// The matching widget events, in delivery order.
    pub fn widget_events(self) -> impl Iterator<Item = WidgetEvent> {
        const ORDER: [(PointerEvents, WidgetEvent); 8] = [
            (PointerEvents::ENTER, WidgetEvent::MouseEnter),
            (PointerEvents::PRESS, WidgetEvent::MousePress),
            (PointerEvents::DRAG_START, WidgetEvent::DragStart),
            (PointerEvents::LONG_PRESS, WidgetEvent::LongPress),
            (PointerEvents::RELEASE, WidgetEvent::MouseRelease),
            (PointerEvents::DRAG_END, WidgetEvent::DragEnd),
            (PointerEvents::CLICK, WidgetEvent::Click),
            (PointerEvents::EXIT, WidgetEvent::MouseExit),
        ];
        ORDER
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, event)| event)
    }
}

/// Mouse state as seen by one widget during one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouseState {
    /// Cursor in screen coordinates.
    pub pos: Vec2,
    /// Cursor relative to the widget's top-left corner. Valid even when the
    /// cursor is outside, which is what drags rely on.
    pub local: Vec2,
    /// The cursor is over this widget and no sibling above it.
    pub is_entered: bool,
    /// Cursor movement since the widget was entered.
    pub entry_delta: Vec2,
    pub left: ButtonState,
    pub right: ButtonState,
    /// Zeroed when a child already consumed the wheel this frame.
    pub wheel_up: u32,
    pub wheel_down: u32,
    pub timestamp_ms: u64,
    pub events: PointerEvents,
    /// A left press that started on this widget is still held.
    pub is_held: bool,
    pub is_dragging: bool,
    /// Cursor travel since the held press started.
    pub drag_delta: Vec2,
    pub held_ms: u64,
}

impl MouseState {
    pub fn has_wheel(&self) -> bool {
        self.wheel_up > 0 || self.wheel_down > 0
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    started_ms: u64,
    origin: Vec2,
    exited: bool,
    dragging: bool,
    long_press_fired: bool,
}

/// Remembers what the widget saw last frame so transitions can be derived.
#[derive(Debug, Clone, Default)]
pub(crate) struct PointerTracker {
    was_entered: bool,
    entry_pos: Vec2,
    press: Option<Press>,
}

impl PointerTracker {
    /// Fill in the synthesized fields of `state`.
    pub fn track(&mut self, state: &mut MouseState, timing: &Timing) {
        let mut events = PointerEvents::empty();
        let now = state.timestamp_ms;

        if state.is_entered && !self.was_entered {
            events |= PointerEvents::ENTER;
            self.entry_pos = state.pos;
        } else if !state.is_entered && self.was_entered {
            events |= PointerEvents::EXIT;
            if let Some(press) = self.press.as_mut() {
                press.exited = true;
            }
        }
        self.was_entered = state.is_entered;
        state.entry_delta = if state.is_entered {
            state.pos - self.entry_pos
        } else {
            Vec2::ZERO
        };

        let left = state.left;
        // Still down with both counts set: the old press ended before a new one began.
        let released_first = left.is_down && left.presses > 0 && left.releases > 0;
        if released_first {
            self.finish_press(state.is_entered, now, timing, &mut events);
        }
        if left.presses > 0 && state.is_entered {
            events |= PointerEvents::PRESS;
            self.press = Some(Press {
                started_ms: now,
                origin: state.pos,
                exited: false,
                dragging: false,
                long_press_fired: false,
            });
        }
        if left.releases > 0 && !released_first {
            self.finish_press(state.is_entered, now, timing, &mut events);
        }

        if self.press.is_some() && !left.is_down {
            // Release was never observed, e.g. focus loss.
            self.press = None;
        }

        state.is_held = false;
        state.is_dragging = false;
        state.drag_delta = Vec2::ZERO;
        state.held_ms = 0;
        if let Some(press) = self.press.as_mut() {
            let travel = state.pos - press.origin;
            if !press.dragging && travel.length() > timing.drag_threshold {
                press.dragging = true;
                events |= PointerEvents::DRAG_START;
            }

            let held_ms = now.saturating_sub(press.started_ms);
            if !press.long_press_fired
                && !press.dragging
                && !press.exited
                && held_ms >= timing.long_press_ms
            {
                press.long_press_fired = true;
                events |= PointerEvents::LONG_PRESS;
            }

            state.is_held = true;
            state.is_dragging = press.dragging;
            state.drag_delta = travel;
            state.held_ms = held_ms;
        }

        state.events = events;
    }

    /// Forget everything, e.g. when the widget is hidden or suspended.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn finish_press(&mut self, entered: bool, now: u64, timing: &Timing, events: &mut PointerEvents) {
        let Some(press) = self.press.take() else {
            return;
        };
        *events |= PointerEvents::RELEASE;
        if press.dragging {
            *events |= PointerEvents::DRAG_END;
        } else if entered
            && !press.exited
            && !press.long_press_fired
            && now.saturating_sub(press.started_ms) < timing.long_press_ms
        {
            *events |= PointerEvents::CLICK;
        }
    }
}
