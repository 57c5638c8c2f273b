//! Widget events and the callbacks registered for them.

use lucent_input::KeyPress;

use crate::commands::Commands;
use crate::widget::WidgetHandle;

/// Event categories a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseEnter,
    MouseExit,
    MousePress,
    MouseRelease,
    Click,
    LongPress,
    DragStart,
    DragEnd,
    ValueChanged,
    StateChanged,
    KeyPressed,
    FocusGained,
    FocusLost,
}

/// An event delivered to a widget's callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    MouseEnter,
    MouseExit,
    MousePress,
    MouseRelease,
    /// Press and release inside the widget, shorter than the long-press time
    /// and without dragging.
    Click,
    /// Reported once per press, after the button is held past the long-press time.
    LongPress,
    DragStart,
    DragEnd,
    ValueChanged(f32),
    StateChanged(bool),
    KeyPressed(KeyPress),
    FocusGained,
    FocusLost,
}

impl WidgetEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WidgetEvent::MouseEnter => EventKind::MouseEnter,
            WidgetEvent::MouseExit => EventKind::MouseExit,
            WidgetEvent::MousePress => EventKind::MousePress,
            WidgetEvent::MouseRelease => EventKind::MouseRelease,
            WidgetEvent::Click => EventKind::Click,
            WidgetEvent::LongPress => EventKind::LongPress,
            WidgetEvent::DragStart => EventKind::DragStart,
            WidgetEvent::DragEnd => EventKind::DragEnd,
            WidgetEvent::ValueChanged(_) => EventKind::ValueChanged,
            WidgetEvent::StateChanged(_) => EventKind::StateChanged,
            WidgetEvent::KeyPressed(_) => EventKind::KeyPressed,
            WidgetEvent::FocusGained => EventKind::FocusGained,
            WidgetEvent::FocusLost => EventKind::FocusLost,
        }
    }
}

/// What a callback sees when it runs.
///
/// Callbacks run synchronously inside the input pass, while the tree is
/// borrowed. Structural changes go through [`commands`](Self::commands) and are
/// applied at the start of the next update.
pub struct EventCtx<'a> {
    pub widget: WidgetHandle,
    pub event: WidgetEvent,
    pub commands: &'a mut Commands,
}

pub type EventCallback = Box<dyn FnMut(&mut EventCtx<'_>) + Send>;

/// Callbacks registered on one widget, in registration order.
#[derive(Default)]
pub struct Callbacks {
    slots: Vec<(EventKind, EventCallback)>,
}

impl Callbacks {
    pub fn add(&mut self, kind: EventKind, callback: EventCallback) {
        self.slots.push((kind, callback));
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.slots.iter().any(|(k, _)| *k == kind)
    }

    /// Drop every callback registered for `kind`.
    pub fn clear(&mut self, kind: EventKind) {
        self.slots.retain(|(k, _)| *k != kind);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Invoke every callback subscribed to `event`'s kind, returning how many ran.
    pub(crate) fn emit(
        &mut self,
        widget: WidgetHandle,
        event: WidgetEvent,
        commands: &mut Commands,
    ) -> usize {
        let kind = event.kind();
        let mut ctx = EventCtx {
            widget,
            event,
            commands,
        };
        let mut invoked = 0;
        for (k, callback) in &mut self.slots {
            if *k == kind {
                callback(&mut ctx);
                invoked += 1;
            }
        }
        invoked
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|(kind, _)| kind))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use lucent_core::alloc::ArenaKey;

    use super::*;

    fn handle() -> WidgetHandle {
        WidgetHandle::from_key(ArenaKey::new(0, 0))
    }

    #[test]
    fn test_emit_only_matching_kind() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let mut callbacks = Callbacks::default();
        {
            let clicks = clicks.clone();
            callbacks.add(
                EventKind::Click,
                Box::new(move |_| {
                    clicks.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }
        callbacks.add(EventKind::MouseEnter, Box::new(|_| panic!("wrong kind")));

        let mut commands = Commands::default();
        let ran = callbacks.emit(handle(), WidgetEvent::Click, &mut commands);
        assert_eq!(ran, 1);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_can_queue_commands() {
        let mut callbacks = Callbacks::default();
        callbacks.add(
            EventKind::ValueChanged,
            Box::new(|ctx| {
                let target = ctx.widget;
                ctx.commands.remove_widget(target);
            }),
        );

        let mut commands = Commands::default();
        callbacks.emit(handle(), WidgetEvent::ValueChanged(0.5), &mut commands);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_clear_kind() {
        let mut callbacks = Callbacks::default();
        callbacks.add(EventKind::Click, Box::new(|_| {}));
        callbacks.add(EventKind::LongPress, Box::new(|_| {}));
        callbacks.clear(EventKind::Click);
        assert!(!callbacks.has(EventKind::Click));
        assert!(callbacks.has(EventKind::LongPress));
    }
}
