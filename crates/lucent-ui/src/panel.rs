//! Container component: child list, background layers, sizing and the
//! render-to-texture cache.

use lucent_core::geometry::{Rect, Size};
use lucent_render::{Color, RenderBackend, TextureId};

use crate::animation::AnimatedColor;
use crate::widget::WidgetHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    pub color: Color,
    /// Offset of the shadow down and to the right.
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CachedTexture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Children and background of a container widget.
///
/// Children added to a panel are staged first and only become part of
/// [`children`](Self::children) at the tree's next sync, so the list being
/// iterated by a pass never changes underneath it.
#[derive(Debug)]
pub struct Panel {
    pub(crate) children: Vec<WidgetHandle>,
    pub(crate) staged: Vec<WidgetHandle>,
    pub(crate) needs_sort: bool,
    pub bg_color: AnimatedColor,
    fill_bg: bool,
    border: Option<Border>,
    shadow: Option<DropShadow>,
    corner_radius: Option<f32>,
    padding: Size<f32>,
    fixed_size: Option<Size<f32>>,
    texture_render: bool,
    pub(crate) texture: Option<CachedTexture>,
    should_refresh_texture: bool,
    /// Background changed since the last update pass looked.
    appearance_changed: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            staged: Vec::new(),
            needs_sort: false,
            bg_color: AnimatedColor::new(Color::TRANSPARENT),
            fill_bg: false,
            border: None,
            shadow: None,
            corner_radius: None,
            padding: Size::new(0.0, 0.0),
            fixed_size: None,
            texture_render: false,
            texture: None,
            should_refresh_texture: true,
            appearance_changed: false,
        }
    }

    /// Live children in draw order (ascending z-level once sorted).
    pub fn children(&self) -> &[WidgetHandle] {
        &self.children
    }

    /// Children added since the last sync.
    pub fn staged(&self) -> &[WidgetHandle] {
        &self.staged
    }

    pub fn set_fill_bg(&mut self, enable: bool, color: Color) {
        self.fill_bg = enable;
        if enable {
            self.bg_color.assign_color(color);
        }
        self.restyled();
    }

    pub fn is_fill_bg(&self) -> bool {
        self.fill_bg
    }

    pub fn set_border(&mut self, enable: bool, color: Color, width: f32) {
        self.border = enable.then_some(Border {
            color,
            width: width.max(0.0),
        });
        self.restyled();
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }

    pub fn set_drop_shadow(&mut self, enable: bool, color: Color, width: f32) {
        self.shadow = enable.then_some(DropShadow {
            color,
            width: width.max(0.0),
        });
        self.restyled();
    }

    pub fn drop_shadow(&self) -> Option<DropShadow> {
        self.shadow
    }

    pub fn set_corner_radius(&mut self, enable: bool, radius: f32) {
        self.corner_radius = enable.then_some(radius.max(0.0));
        self.restyled();
    }

    pub fn corner_radius(&self) -> Option<f32> {
        self.corner_radius
    }

    /// Extra space added to the children's bounding box under dynamic sizing.
    pub fn set_padding(&mut self, width: f32, height: f32) {
        self.padding = Size::new(width.max(0.0), height.max(0.0));
    }

    pub fn padding(&self) -> Size<f32> {
        self.padding
    }

    /// Pin the panel to `width` x `height`, ignoring its children's extent.
    pub fn set_fixed_size(&mut self, enable: bool, width: f32, height: f32) {
        self.fixed_size = enable.then(|| Size::new(width.max(0.0), height.max(0.0)));
    }

    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size.is_some()
    }

    /// Render the panel into an offscreen texture once and blit it until the
    /// texture is invalidated.
    ///
    /// The texture is redrawn after a resize, a call to
    /// [`refresh_texture`](Self::refresh_texture), or an update pass in which
    /// a descendant moved, resized, changed visibility, restyled its panel or
    /// asked for a redraw through
    /// [`WidgetBase::request_redraw`](crate::WidgetBase::request_redraw).
    /// The drop shadow is drawn outside the texture, straight onto the
    /// parent's target.
    pub fn set_texture_render(&mut self, enable: bool) {
        self.texture_render = enable;
        self.should_refresh_texture = true;
    }

    pub fn is_texture_render(&self) -> bool {
        self.texture_render
    }

    pub fn refresh_texture(&mut self) {
        self.should_refresh_texture = true;
    }

    pub fn should_refresh_texture(&self) -> bool {
        self.should_refresh_texture
    }

    fn restyled(&mut self) {
        self.should_refresh_texture = true;
        self.appearance_changed = true;
    }

    /// Whether the background changed since the last call.
    pub(crate) fn take_appearance_changed(&mut self) -> bool {
        std::mem::take(&mut self.appearance_changed)
    }

    pub(crate) fn texture_drawn(&mut self, texture: CachedTexture) {
        self.texture = Some(texture);
        self.should_refresh_texture = false;
    }

    /// Size for the given children extent: the fixed size if set, otherwise
    /// the extent plus padding.
    pub fn resolve_size(&self, content: Size<f32>) -> Size<f32> {
        match self.fixed_size {
            Some(size) => size,
            None => Size::new(
                content.width + self.padding.width,
                content.height + self.padding.height,
            ),
        }
    }

    pub(crate) fn update(&mut self, elapsed_ms: i64) {
        let animating = self.bg_color.is_translating() || self.bg_color.is_animating();
        self.bg_color.update(elapsed_ms);
        if animating && self.fill_bg {
            self.restyled();
        }
    }

    /// Draw shadow, fill and border, in that order, each as one rounded primitive.
    pub fn draw_background(&self, backend: &mut dyn RenderBackend, rect: Rect<f32>) {
        self.draw_shadow(backend, rect);
        self.draw_surface(backend, rect);
    }

    /// The drop shadow alone, offset down and right of `rect`.
    pub fn draw_shadow(&self, backend: &mut dyn RenderBackend, rect: Rect<f32>) {
        if rect.is_empty() {
            return;
        }
        if let Some(shadow) = self.shadow
            && shadow.width > 0.0
        {
            let radius = self.corner_radius.unwrap_or(0.0);
            backend.draw_filled_rect(rect.offset(shadow.width, shadow.width), shadow.color, radius);
        }
    }

    /// Fill then border, both within `rect`.
    pub fn draw_surface(&self, backend: &mut dyn RenderBackend, rect: Rect<f32>) {
        if rect.is_empty() {
            return;
        }
        let radius = self.corner_radius.unwrap_or(0.0);
        if self.fill_bg {
            backend.draw_filled_rect(rect, self.bg_color.color(), radius);
        }
        if let Some(border) = self.border
            && border.width > 0.0
        {
            backend.draw_border_rect(rect, border.color, border.width, radius);
        }
    }

    /// Textures owned by this panel, for release when its widget is freed.
    pub(crate) fn take_textures(&mut self, retired: &mut Vec<TextureId>) {
        if let Some(texture) = self.texture.take() {
            retired.push(texture.id);
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}
