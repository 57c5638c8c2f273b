//! Widget data: the shared base, the kind dispatcher and handles.
//!
//! A [`Widget`] is built detached and moved into a tree with
//! [`WidgetTree::add_widget`](crate::WidgetTree::add_widget), which hands back
//! a [`WidgetHandle`]. Moving the value is what keeps a widget under exactly
//! one parent.

mod base;
mod handle;
mod hooks;

pub use base::{WidgetBase, WidgetId};
pub use handle::WidgetHandle;
pub use hooks::{
    DrawCtx, InputCtx, Parts, RefreshCtx, Services, UpdateCtx, WidgetHooks, WidgetKind, WidgetType,
};

use crate::panel::Panel;

/// A widget not yet (or no longer) attached to a tree.
#[derive(Debug)]
pub struct Widget {
    pub(crate) base: WidgetBase,
    pub(crate) panel: Option<Panel>,
    pub(crate) kind: WidgetKind,
}

impl Widget {
    pub fn new(kind: WidgetKind, panel: Option<Panel>) -> Self {
        Self {
            base: WidgetBase::new(),
            panel,
            kind,
        }
    }

    /// An empty container.
    pub fn panel() -> Self {
        Self::new(WidgetKind::Panel, Some(Panel::new()))
    }

    /// A leaf with user-defined hooks.
    pub fn custom(hooks: impl WidgetHooks) -> Self {
        Self::new(WidgetKind::Custom(Box::new(hooks)), None)
    }

    /// A container with user-defined hooks.
    pub fn custom_panel(hooks: impl WidgetHooks) -> Self {
        Self::new(WidgetKind::Custom(Box::new(hooks)), Some(Panel::new()))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.set_name(name);
        self
    }

    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.base.set_size(width, height);
        if let Some(panel) = self.panel.as_mut() {
            panel.set_fixed_size(true, width, height);
        }
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.base.is_visible = visible;
        self
    }

    pub fn focusable(mut self, enable: bool) -> Self {
        self.base.is_keyboard_focus_enabled = enable;
        self
    }

    pub fn hover_enabled(mut self, enable: bool) -> Self {
        self.base.is_mouse_hover_enabled = enable;
        self
    }

    /// Configure the container component, if this widget has one.
    pub fn with_panel(mut self, configure: impl FnOnce(&mut Panel)) -> Self {
        if let Some(panel) = self.panel.as_mut() {
            configure(panel);
        }
        self
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    pub fn panel_ref(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut Panel> {
        self.panel.as_mut()
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    pub fn is_container(&self) -> bool {
        self.panel.is_some()
    }

    /// Borrow the base and panel together for a hook call.
    pub(crate) fn split(&mut self) -> (Parts<'_>, &mut WidgetKind) {
        (
            Parts {
                base: &mut self.base,
                panel: self.panel.as_mut(),
            },
            &mut self.kind,
        )
    }
}

/// A widget as stored in the tree.
#[derive(Debug)]
pub(crate) struct Node {
    pub widget: Widget,
    pub parent: Option<WidgetHandle>,
    pub ref_count: u32,
}
