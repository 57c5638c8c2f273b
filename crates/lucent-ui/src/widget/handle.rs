use std::fmt;

use lucent_core::alloc::ArenaKey;

/// Non-owning, `Copy` reference to a widget in a [`WidgetTree`](crate::WidgetTree).
///
/// Every access checks the slot's generation, so a handle that outlived its
/// widget resolves to `None` rather than to whatever reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(ArenaKey);

impl WidgetHandle {
    pub(crate) fn from_key(key: ArenaKey) -> Self {
        Self(key)
    }

    pub(crate) fn key(self) -> ArenaKey {
        self.0
    }

    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}

static_assertions::assert_eq_size!(WidgetHandle, Option<WidgetHandle>);
