//! Per-frame passes: update (pre-order), draw (ascending z) and refresh.

use std::sync::Arc;

use lucent_core::geometry::{Rect, Size};
use lucent_core::math::Vec2;
use lucent_core::profiling::{profile_function, profile_scope};
use lucent_render::{Color, RenderBackend, RenderTarget};

use crate::panel::CachedTexture;
use crate::theme::Theme;
use crate::tree::WidgetTree;
use crate::widget::{DrawCtx, RefreshCtx, UpdateCtx, WidgetHandle};

impl WidgetTree {
    /// Sync, then advance every live widget by `elapsed_ms`.
    ///
    /// Each widget's base (position, screen coordinates, destroy timer) runs
    /// before its kind hook, and a parent finishes before its children start,
    /// so children always see the parent's current screen position.
    pub fn update(&mut self, elapsed_ms: i64) {
        profile_function!();
        self.sync();
        let root = self.root;
        self.update_node(root, elapsed_ms.max(0), Vec2::ZERO);
    }

    /// Returns whether anything in the subtree changed how it looks, so a
    /// cached ancestor knows to re-render.
    fn update_node(&mut self, handle: WidgetHandle, elapsed_ms: i64, origin: Vec2) -> bool {
        let (children, screen_pos) = {
            let Some(node) = self.nodes.get_mut(handle.key()) else {
                return false;
            };
            let widget = &mut node.widget;
            if widget.base.is_destroyed() {
                return false;
            }
            widget.base.update(elapsed_ms, origin);
            if widget.base.is_destroyed() {
                return true;
            }
            if let Some(panel) = widget.panel.as_mut() {
                panel.update(elapsed_ms);
            }

            let (mut parts, kind) = widget.split();
            let mut ctx = UpdateCtx {
                handle,
                elapsed_ms,
                theme: &self.theme,
                services: &self.services,
                commands: &mut self.commands,
            };
            kind.update(&mut parts, &mut ctx);

            let children = widget
                .panel
                .as_ref()
                .map(|panel| panel.children.clone())
                .unwrap_or_default();
            (children, widget.base.screen_pos())
        };

        let mut subtree_changed = false;
        for child in children {
            subtree_changed |= self.update_node(child, elapsed_ms, screen_pos);
        }
        self.reset_size(handle);

        let Some(widget) = self.widget_mut(handle) else {
            return subtree_changed;
        };
        let mut changed = widget.base.take_redraw();
        if let Some(panel) = widget.panel.as_mut() {
            changed |= panel.take_appearance_changed();
            if subtree_changed && panel.is_texture_render() {
                panel.refresh_texture();
            }
        }
        changed || subtree_changed
    }

    /// Recompute a panel's size from its visible children, or apply its fixed
    /// size. A size change invalidates the panel's cached texture.
    pub fn reset_size(&mut self, handle: WidgetHandle) {
        let Some(panel) = self.panel(handle) else {
            return;
        };
        let size = if panel.is_fixed_size() {
            panel.resolve_size(Size::new(0.0, 0.0))
        } else {
            let mut extent = Size::new(0.0_f32, 0.0_f32);
            for child in &panel.children {
                let Some(base) = self.base(*child) else {
                    continue;
                };
                if base.is_destroyed() || !base.is_visible {
                    continue;
                }
                extent.width = extent.width.max(base.position.x() + base.width());
                extent.height = extent.height.max(base.position.y() + base.height());
            }
            panel.resolve_size(extent)
        };

        let Some(widget) = self.widget_mut(handle) else {
            return;
        };
        widget.base.set_size(size.width, size.height);
        if widget.base.take_size_changed()
            && let Some(panel) = widget.panel.as_mut()
        {
            panel.refresh_texture();
        }
    }

    /// Draw the tree into `target`, lowest z-level first.
    ///
    /// Textures released since the previous draw are destroyed first.
    pub fn draw(&mut self, backend: &mut dyn RenderBackend, target: RenderTarget) {
        profile_function!();
        for texture in self.retired_textures.drain(..) {
            backend.destroy_texture(texture);
        }
        if backend.render_target() != target
            && let Err(err) = backend.set_render_target(target)
        {
            tracing::warn!(%err, ?target, "cannot bind render target; frame skipped");
            return;
        }
        let root = self.root;
        self.draw_node(root, Vec2::ZERO, target, backend);
    }

    fn draw_node(
        &mut self,
        handle: WidgetHandle,
        origin: Vec2,
        target: RenderTarget,
        backend: &mut dyn RenderBackend,
    ) {
        self.sort_children(handle);
        let Some(widget) = self.widget(handle) else {
            return;
        };
        if widget.base.is_destroyed() || !widget.base.is_visible {
            return;
        }
        let position = origin + widget.base.position.as_vec2();
        let rect = Rect::new(position.x, position.y, widget.base.width(), widget.base.height());

        let cached = widget
            .panel
            .as_ref()
            .is_some_and(|panel| panel.is_texture_render());
        if cached && self.draw_cached(handle, rect, target, backend) {
            return;
        }
        self.draw_contents(handle, rect, target, true, backend);
    }

    /// Background, kind hook, then children, all relative to `rect`.
    /// The shadow is left out when rendering into the panel's own texture.
    fn draw_contents(
        &mut self,
        handle: WidgetHandle,
        rect: Rect<f32>,
        target: RenderTarget,
        with_shadow: bool,
        backend: &mut dyn RenderBackend,
    ) {
        let children = {
            let Some(node) = self.nodes.get_mut(handle.key()) else {
                return;
            };
            let widget = &mut node.widget;
            if let Some(panel) = widget.panel.as_ref() {
                if with_shadow {
                    panel.draw_background(backend, rect);
                } else {
                    panel.draw_surface(backend, rect);
                }
            }

            let (mut parts, kind) = widget.split();
            let mut ctx = DrawCtx {
                handle,
                backend: &mut *backend,
                target,
                rect,
                theme: &self.theme,
                services: &self.services,
            };
            kind.draw(&mut parts, &mut ctx);

            widget
                .panel
                .as_ref()
                .map(|panel| panel.children.clone())
                .unwrap_or_default()
        };

        for child in children {
            self.draw_node(child, rect.position(), target, backend);
        }
    }

    /// Blit the panel's cached texture, re-rendering it first when stale.
    /// Returns false when no texture could be made and the caller should draw
    /// directly.
    fn draw_cached(
        &mut self,
        handle: WidgetHandle,
        rect: Rect<f32>,
        target: RenderTarget,
        backend: &mut dyn RenderBackend,
    ) -> bool {
        if rect.is_empty() {
            return true;
        }
        let width = rect.width.ceil() as u32;
        let height = rect.height.ceil() as u32;

        let reusable = self.panel(handle).and_then(|panel| match panel.texture {
            Some(texture)
                if !panel.should_refresh_texture()
                    && texture.width == width
                    && texture.height == height =>
            {
                Some(texture.id)
            }
            _ => None,
        });

        let texture = match reusable {
            Some(texture) => texture,
            None => {
                profile_scope!("render_panel_texture");
                if let Some(stale) = self.panel_mut(handle).and_then(|panel| panel.texture.take()) {
                    backend.destroy_texture(stale.id);
                }
                let texture = match backend.create_render_texture(width, height) {
                    Ok(texture) => texture,
                    Err(err) => {
                        tracing::warn!(%handle, %err, "panel texture unavailable; drawing directly");
                        return false;
                    }
                };
                let offscreen = RenderTarget::Texture(texture);
                if let Err(err) = backend.set_render_target(offscreen) {
                    tracing::warn!(%handle, %err, "cannot render into panel texture; drawing directly");
                    backend.destroy_texture(texture);
                    return false;
                }
                backend.clear(Color::TRANSPARENT);
                let local = Rect::new(0.0, 0.0, rect.width, rect.height);
                self.draw_contents(handle, local, offscreen, false, backend);
                if let Err(err) = backend.set_render_target(target) {
                    tracing::warn!(%handle, %err, ?target, "cannot restore render target");
                }
                if let Some(panel) = self.panel_mut(handle) {
                    panel.texture_drawn(CachedTexture {
                        id: texture,
                        width,
                        height,
                    });
                }
                texture
            }
        };

        if let Some(panel) = self.panel(handle) {
            panel.draw_shadow(backend, rect);
        }
        if let Err(err) = backend.copy_texture(texture, None, rect, [255, 255, 255], 255) {
            tracing::warn!(%handle, %err, "failed to blit panel texture");
        }
        true
    }

    /// Install `theme` and re-run every refresh hook.
    pub fn refresh(&mut self, theme: impl Into<Arc<Theme>>) {
        self.theme = theme.into();
        self.refresh_all();
    }

    /// Re-run every refresh hook against the current theme.
    pub fn refresh_all(&mut self) {
        profile_function!();
        let root = self.root;
        self.refresh_node(root);
    }

    fn refresh_node(&mut self, handle: WidgetHandle) {
        if !self.is_live(handle) {
            return;
        }
        self.refresh_one(handle);
        let children = self.children(handle).to_vec();
        for child in children {
            self.refresh_node(child);
        }
        self.reset_size(handle);
    }

    pub(crate) fn refresh_one(&mut self, handle: WidgetHandle) {
        let Some(node) = self.nodes.get_mut(handle.key()) else {
            return;
        };
        let widget = &mut node.widget;
        let (mut parts, kind) = widget.split();
        let ctx = RefreshCtx {
            theme: &self.theme,
            services: &self.services,
        };
        kind.refresh(&mut parts, &ctx);
        if let Some(panel) = widget.panel.as_mut() {
            panel.refresh_texture();
        }
    }
}
