//! The widget tree: arena-owned nodes, lifecycle and structural sync.
//!
//! Frame passes (update, draw, refresh) and input routing are further
//! `impl WidgetTree` blocks in their own modules.

use std::sync::Arc;

use lucent_core::alloc::Arena;
use lucent_core::math::Vec2;
use lucent_core::profiling::profile_function;
use lucent_render::TextureId;

use crate::commands::{Commands, TreeProxy};
use crate::event::{EventCtx, EventKind, WidgetEvent};
use crate::panel::Panel;
use crate::theme::Theme;
use crate::widget::{Node, Services, Widget, WidgetBase, WidgetHandle, WidgetHooks, WidgetKind, WidgetType};

/// Result of [`WidgetTree::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Still referenced; carries the remaining count.
    Retained(u32),
    /// The count reached zero and the widget (with its subtree) was freed.
    Freed,
    /// The handle no longer refers to a widget.
    Stale,
}

/// Owner of every widget in one UI.
///
/// Widgets are referenced by [`WidgetHandle`]. The tree itself holds one
/// reference per child slot; [`retain`](Self::retain) and
/// [`release`](Self::release) let other holders keep a widget alive after it
/// has been swept out of its parent.
pub struct WidgetTree {
    pub(crate) nodes: Arena<Node>,
    pub(crate) root: WidgetHandle,
    pub(crate) theme: Arc<Theme>,
    pub(crate) services: Services,
    pub(crate) commands: Commands,
    proxy: TreeProxy,
    pub(crate) focus: Option<WidgetHandle>,
    pub(crate) pending_focus: Option<WidgetHandle>,
    pub(crate) retired_textures: Vec<TextureId>,
}

impl WidgetTree {
    pub fn new(theme: impl Into<Arc<Theme>>) -> Self {
        Self::with_services(theme, Services::default())
    }

    pub fn with_services(theme: impl Into<Arc<Theme>>, services: Services) -> Self {
        let mut nodes = Arena::new();
        let key = nodes.insert(Node {
            widget: Widget::panel().named("root"),
            parent: None,
            ref_count: 1,
        });
        Self {
            nodes,
            root: WidgetHandle::from_key(key),
            theme: theme.into(),
            services,
            commands: Commands::default(),
            proxy: TreeProxy::default(),
            focus: None,
            pending_focus: None,
            retired_textures: Vec::new(),
        }
    }

    /// The root panel. It cannot be removed.
    pub fn root(&self) -> WidgetHandle {
        self.root
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Swap collaborators and re-run every refresh hook.
    pub fn set_services(&mut self, services: Services) {
        self.services = services;
        self.refresh_all();
    }

    /// Live widgets, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pin the root panel to the window size.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        let root = self.root;
        if let Some(node) = self.nodes.get_mut(root.key()) {
            if let Some(panel) = node.widget.panel.as_mut() {
                panel.set_fixed_size(true, width, height);
                panel.refresh_texture();
            }
            node.widget.base.set_size(width, height);
        }
    }

    /// Stage `widget` under `parent` at `(x, y)` with the given z-level.
    ///
    /// The child becomes visible to passes and hit tests at the next
    /// [`sync`](Self::sync). Returns `None`, dropping the widget, when
    /// `parent` is stale or not a container.
    pub fn add_widget(
        &mut self,
        parent: WidgetHandle,
        widget: impl Into<Widget>,
        x: f32,
        y: f32,
        z_level: i32,
    ) -> Option<WidgetHandle> {
        let mut widget = widget.into();
        let Some(parent_node) = self.nodes.get(parent.key()) else {
            tracing::warn!(%parent, "add_widget: parent no longer exists");
            return None;
        };
        if parent_node.widget.panel.is_none() {
            tracing::warn!(
                %parent,
                kind = parent_node.widget.kind.name(),
                "add_widget: parent is not a container"
            );
            return None;
        }

        widget.base.position.assign(x, y);
        widget.base.z_level = z_level;
        let handle = WidgetHandle::from_key(self.nodes.insert(Node {
            widget,
            parent: Some(parent),
            ref_count: 1,
        }));
        if let Some(panel) = self.panel_mut(parent) {
            panel.staged.push(handle);
        }
        tracing::trace!(%handle, %parent, "widget staged");
        Some(handle)
    }

    /// Mark a widget destroyed. It is skipped by every pass from now on and
    /// leaves its parent at the next sync.
    pub fn remove_widget(&mut self, handle: WidgetHandle) -> bool {
        if handle == self.root {
            tracing::warn!("the root panel cannot be removed");
            return false;
        }
        match self.nodes.get_mut(handle.key()) {
            Some(node) => {
                node.widget.base.destroy();
                true
            }
            None => false,
        }
    }

    /// Add a reference, returning the new count.
    pub fn retain(&mut self, handle: WidgetHandle) -> Option<u32> {
        let node = self.nodes.get_mut(handle.key())?;
        node.ref_count += 1;
        Some(node.ref_count)
    }

    /// Drop a reference. The widget and its subtree are freed when the count
    /// reaches zero.
    pub fn release(&mut self, handle: WidgetHandle) -> ReleaseOutcome {
        let root = self.root;
        let Some(node) = self.nodes.get_mut(handle.key()) else {
            tracing::warn!(%handle, "release of a stale widget handle");
            return ReleaseOutcome::Stale;
        };
        if handle == root && node.ref_count <= 1 {
            tracing::warn!("release would free the root panel; ignored");
            return ReleaseOutcome::Retained(node.ref_count);
        }

        node.ref_count = node.ref_count.saturating_sub(1);
        if node.ref_count > 0 {
            return ReleaseOutcome::Retained(node.ref_count);
        }
        if node.parent.is_some_and(|parent| self.lists_child(parent, handle)) {
            tracing::warn!(%handle, "widget released while still owned by its parent");
        }
        self.free(handle);
        ReleaseOutcome::Freed
    }

    pub fn ref_count(&self, handle: WidgetHandle) -> Option<u32> {
        self.nodes.get(handle.key()).map(|node| node.ref_count)
    }

    /// The handle still refers to a widget, destroyed or not.
    pub fn contains(&self, handle: WidgetHandle) -> bool {
        self.nodes.contains(handle.key())
    }

    /// The widget exists and is not marked destroyed.
    pub fn is_live(&self, handle: WidgetHandle) -> bool {
        self.base(handle).is_some_and(|base| !base.is_destroyed())
    }

    pub fn widget(&self, handle: WidgetHandle) -> Option<&Widget> {
        self.nodes.get(handle.key()).map(|node| &node.widget)
    }

    pub fn widget_mut(&mut self, handle: WidgetHandle) -> Option<&mut Widget> {
        self.nodes.get_mut(handle.key()).map(|node| &mut node.widget)
    }

    pub fn base(&self, handle: WidgetHandle) -> Option<&WidgetBase> {
        self.widget(handle).map(|widget| &widget.base)
    }

    pub fn base_mut(&mut self, handle: WidgetHandle) -> Option<&mut WidgetBase> {
        self.widget_mut(handle).map(|widget| &mut widget.base)
    }

    pub fn panel(&self, handle: WidgetHandle) -> Option<&Panel> {
        self.widget(handle)?.panel.as_ref()
    }

    pub fn panel_mut(&mut self, handle: WidgetHandle) -> Option<&mut Panel> {
        self.widget_mut(handle)?.panel.as_mut()
    }

    pub fn kind(&self, handle: WidgetHandle) -> Option<&WidgetKind> {
        self.widget(handle).map(|widget| &widget.kind)
    }

    /// Typed access to a built-in leaf kind.
    pub fn get<T: WidgetType>(&self, handle: WidgetHandle) -> Option<&T> {
        T::from_kind(self.kind(handle)?)
    }

    pub fn get_mut<T: WidgetType>(&mut self, handle: WidgetHandle) -> Option<&mut T> {
        T::from_kind_mut(&mut self.widget_mut(handle)?.kind)
    }

    pub fn custom<T: WidgetHooks>(&self, handle: WidgetHandle) -> Option<&T> {
        self.kind(handle)?.custom::<T>()
    }

    pub fn custom_mut<T: WidgetHooks>(&mut self, handle: WidgetHandle) -> Option<&mut T> {
        self.widget_mut(handle)?.kind.custom_mut::<T>()
    }

    pub fn parent(&self, handle: WidgetHandle) -> Option<WidgetHandle> {
        self.nodes.get(handle.key())?.parent
    }

    /// Merged children in draw order. Children staged since the last sync are
    /// not included.
    pub fn children(&self, handle: WidgetHandle) -> &[WidgetHandle] {
        self.panel(handle).map_or(&[], |panel| panel.children())
    }

    /// Change paint and hit-test order. The parent re-sorts lazily.
    pub fn set_z_level(&mut self, handle: WidgetHandle, z_level: i32) -> bool {
        let Some(node) = self.nodes.get_mut(handle.key()) else {
            return false;
        };
        if node.widget.base.z_level == z_level {
            return true;
        }
        node.widget.base.z_level = z_level;
        if let Some(parent) = node.parent
            && let Some(panel) = self.panel_mut(parent)
        {
            panel.needs_sort = true;
            panel.refresh_texture();
        }
        true
    }

    /// Register `callback` for events of `kind` on `handle`.
    pub fn on(
        &mut self,
        handle: WidgetHandle,
        kind: EventKind,
        callback: impl FnMut(&mut EventCtx<'_>) + Send + 'static,
    ) -> bool {
        match self.base_mut(handle) {
            Some(base) => {
                base.callbacks.add(kind, Box::new(callback));
                true
            }
            None => false,
        }
    }

    /// Queue for operations applied at the next sync.
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    /// A cloneable, thread-safe queue into this tree.
    pub fn proxy(&self) -> TreeProxy {
        self.proxy.clone()
    }

    pub fn keyboard_focus(&self) -> Option<WidgetHandle> {
        self.focus
    }

    /// Move keyboard focus, firing `FocusLost`/`FocusGained`. Fails for
    /// handles that are stale or destroyed.
    pub fn set_keyboard_focus(&mut self, handle: Option<WidgetHandle>) -> bool {
        if handle.is_some_and(|h| !self.is_live(h)) {
            return false;
        }
        if self.focus == handle {
            return true;
        }
        let previous = std::mem::replace(&mut self.focus, handle);
        if let Some(previous) = previous {
            self.emit(previous, WidgetEvent::FocusLost);
        }
        if let Some(handle) = handle {
            self.emit(handle, WidgetEvent::FocusGained);
        }
        true
    }

    /// Topmost widget containing the screen point.
    ///
    /// Children are searched in descending z-order, descending into child
    /// panels before testing the panel itself. With `require_hover`, widgets
    /// that have hover disabled are passed over.
    pub fn find_widget(&self, x: f32, y: f32, require_hover: bool) -> Option<WidgetHandle> {
        profile_function!();
        self.find_in(self.root, Vec2::new(x, y), require_hover)
    }

    fn find_in(&self, panel: WidgetHandle, point: Vec2, require_hover: bool) -> Option<WidgetHandle> {
        for child in self.children_top_down(panel) {
            let Some(node) = self.nodes.get(child.key()) else {
                continue;
            };
            let base = &node.widget.base;
            if base.is_destroyed() || !base.is_visible || !base.has_screen_position() {
                continue;
            }
            if node.widget.panel.is_some()
                && let Some(hit) = self.find_in(child, point, require_hover)
            {
                return Some(hit);
            }
            if base.screen_rect().contains(point) && (!require_hover || base.is_mouse_hover_enabled) {
                return Some(child);
            }
        }
        None
    }

    /// Resolve a `/`-separated path of widget names starting below the root.
    pub fn find_by_path(&self, path: &str) -> Option<WidgetHandle> {
        let mut current = self.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let panel = self.panel(current)?;
            current = panel
                .children
                .iter()
                .chain(&panel.staged)
                .copied()
                .find(|child| {
                    self.base(*child)
                        .is_some_and(|base| !base.is_destroyed() && base.name() == Some(segment))
                })?;
        }
        Some(current)
    }

    /// Apply queued operations, merge staged children and sweep destroyed ones.
    ///
    /// Runs at the start of every [`update`](Self::update). Nothing else
    /// changes a panel's child list.
    pub fn sync(&mut self) {
        profile_function!();

        let mut ops = self.proxy.drain();
        ops.extend(self.commands.take());
        for op in ops {
            op(self);
        }

        let mut merged = Vec::new();
        let mut containers = Vec::new();
        for (key, node) in self.nodes.iter_mut() {
            let Some(panel) = node.widget.panel.as_mut() else {
                continue;
            };
            containers.push(WidgetHandle::from_key(key));
            if !panel.staged.is_empty() {
                let staged = std::mem::take(&mut panel.staged);
                panel.children.extend_from_slice(&staged);
                panel.needs_sort = true;
                panel.refresh_texture();
                merged.extend(staged);
            }
        }

        let mut reaped = Vec::new();
        for container in containers {
            let Some(panel) = self.panel(container) else {
                continue;
            };
            let dead: Vec<WidgetHandle> = panel
                .children
                .iter()
                .copied()
                .filter(|child| !self.is_live(*child))
                .collect();
            if dead.is_empty() {
                continue;
            }
            if let Some(panel) = self.panel_mut(container) {
                panel.children.retain(|child| !dead.contains(child));
                panel.refresh_texture();
            }
            reaped.extend(dead);
        }

        for handle in reaped {
            let Some(node) = self.nodes.get_mut(handle.key()) else {
                continue;
            };
            node.parent = None;
            tracing::trace!(%handle, "swept destroyed widget");
            self.release(handle);
        }

        if self.focus.is_some_and(|focus| !self.is_live(focus)) {
            self.focus = None;
        }

        for handle in merged {
            if self.is_live(handle) {
                self.refresh_one(handle);
            }
        }
    }

    /// Fire `event` on `handle`'s callbacks.
    pub(crate) fn emit(&mut self, handle: WidgetHandle, event: WidgetEvent) -> usize {
        match self.nodes.get_mut(handle.key()) {
            Some(node) => node
                .widget
                .base
                .callbacks
                .emit(handle, event, &mut self.commands),
            None => 0,
        }
    }

    /// Sort a panel's children by ascending z-level if they changed.
    pub(crate) fn sort_children(&mut self, handle: WidgetHandle) {
        let Some(panel) = self.panel(handle) else {
            return;
        };
        if !panel.needs_sort {
            return;
        }
        let sorted = self.sorted_by_z(&panel.children);
        if let Some(panel) = self.panel_mut(handle) {
            panel.children = sorted;
            panel.needs_sort = false;
        }
    }

    /// Children from the highest z-level down, without mutating the panel.
    pub(crate) fn children_top_down(&self, handle: WidgetHandle) -> Vec<WidgetHandle> {
        let Some(panel) = self.panel(handle) else {
            return Vec::new();
        };
        let mut children = if panel.needs_sort {
            self.sorted_by_z(&panel.children)
        } else {
            panel.children.clone()
        };
        children.reverse();
        children
    }

    fn sorted_by_z(&self, children: &[WidgetHandle]) -> Vec<WidgetHandle> {
        let mut sorted = children.to_vec();
        // Stable: equal z-levels keep insertion order.
        sorted.sort_by_key(|child| self.base(*child).map_or(0, |base| base.z_level()));
        sorted
    }

    fn lists_child(&self, parent: WidgetHandle, child: WidgetHandle) -> bool {
        self.panel(parent)
            .is_some_and(|panel| panel.children.contains(&child) || panel.staged.contains(&child))
    }

    fn free(&mut self, handle: WidgetHandle) {
        let Some(mut node) = self.nodes.remove(handle.key()) else {
            return;
        };
        tracing::debug!(%handle, kind = node.widget.kind.name(), "widget freed");

        if self.focus == Some(handle) {
            self.focus = None;
        }
        node.widget.kind.release_resources(&mut self.retired_textures);

        if let Some(mut panel) = node.widget.panel.take() {
            panel.take_textures(&mut self.retired_textures);
            for child in panel.children.into_iter().chain(panel.staged) {
                if let Some(child_node) = self.nodes.get_mut(child.key()) {
                    child_node.parent = None;
                    self.release(child);
                }
            }
        }
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("len", &self.nodes.len())
            .field("root", &self.root)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> WidgetTree {
        WidgetTree::new(Theme::dark())
    }

    #[test]
    fn test_add_is_staged_until_sync() {
        let mut tree = tree();
        let root = tree.root();
        let child = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 0).unwrap();
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.panel(root).unwrap().staged(), &[child]);

        tree.sync();
        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.parent(child), Some(root));
    }

    #[test]
    fn test_add_to_leaf_is_rejected() {
        let mut tree = tree();
        let root = tree.root();
        let leaf = tree
            .add_widget(root, Widget::custom(Inert), 0.0, 0.0, 0)
            .unwrap();
        assert!(tree.add_widget(leaf, Widget::panel(), 0.0, 0.0, 0).is_none());
    }

    #[test]
    fn test_refcount_frees_on_last_release() {
        let mut tree = tree();
        let root = tree.root();
        let child = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 0).unwrap();
        tree.sync();

        assert_eq!(tree.retain(child), Some(2));
        assert_eq!(tree.release(child), ReleaseOutcome::Retained(1));
        assert!(tree.contains(child));

        tree.remove_widget(child);
        tree.sync();
        assert!(!tree.contains(child));
        assert_eq!(tree.release(child), ReleaseOutcome::Stale);
    }

    #[test]
    fn test_freeing_a_panel_frees_its_subtree() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 0).unwrap();
        let inner = tree.add_widget(outer, Widget::panel(), 0.0, 0.0, 0).unwrap();
        tree.sync();

        tree.remove_widget(outer);
        tree.sync();
        assert!(!tree.contains(outer));
        assert!(!tree.contains(inner));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_root_is_protected() {
        let mut tree = tree();
        let root = tree.root();
        assert!(!tree.remove_widget(root));
        assert_eq!(tree.release(root), ReleaseOutcome::Retained(1));
        assert!(tree.contains(root));
    }

    #[test]
    fn test_find_by_path() {
        let mut tree = tree();
        let root = tree.root();
        let menu = tree
            .add_widget(root, Widget::panel().named("menu"), 0.0, 0.0, 0)
            .unwrap();
        let item = tree
            .add_widget(menu, Widget::panel().named("quit"), 0.0, 0.0, 0)
            .unwrap();
        tree.sync();

        assert_eq!(tree.find_by_path("menu/quit"), Some(item));
        assert_eq!(tree.find_by_path("menu"), Some(menu));
        assert_eq!(tree.find_by_path("menu/missing"), None);
    }

    #[test]
    fn test_sort_is_stable_for_equal_z() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 1).unwrap();
        let b = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 0).unwrap();
        let c = tree.add_widget(root, Widget::panel(), 0.0, 0.0, 1).unwrap();
        tree.sync();
        tree.sort_children(root);
        assert_eq!(tree.children(root), &[b, a, c]);

        tree.set_z_level(b, 5);
        assert_eq!(tree.children_top_down(root), vec![b, c, a]);
    }

    struct Inert;
    impl WidgetHooks for Inert {}
}
