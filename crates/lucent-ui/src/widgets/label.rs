use lucent_core::geometry::{Rect, Size};
use lucent_render::{Color, RenderBackend, TextureId};

use crate::animation::AnimatedColor;
use crate::theme::Theme;
use crate::widget::{DrawCtx, Parts, RefreshCtx, Services, UpdateCtx, Widget, WidgetHooks, WidgetKind};

/// Typographic role of a label. Picks the theme's size and, for captions,
/// the secondary text color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextRole {
    Title,
    #[default]
    Body,
    Caption,
}

#[derive(Debug, Clone, Copy)]
struct TextTexture {
    id: TextureId,
    width: u32,
    height: u32,
}

/// A single line of text.
///
/// Measured through the [`FontProvider`](lucent_render::FontProvider) on
/// refresh and rasterized into a texture on first draw. Changing the text
/// retires the old texture; it is destroyed on the next draw.
#[derive(Debug)]
pub struct Label {
    text: String,
    role: TextRole,
    font_size: Option<f32>,
    /// Tint applied when blitting the text.
    pub color: AnimatedColor,
    themed_color: bool,
    texture: Option<TextTexture>,
    texture_dirty: bool,
    measure_dirty: bool,
    /// Text or styling changed since the last update pass.
    appearance_changed: bool,
    retired: Vec<TextureId>,
    warned: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: TextRole::Body,
            font_size: None,
            color: AnimatedColor::new(Color::WHITE),
            themed_color: true,
            texture: None,
            texture_dirty: true,
            measure_dirty: true,
            appearance_changed: false,
            retired: Vec::new(),
            warned: false,
        }
    }

    pub fn with_role(mut self, role: TextRole) -> Self {
        self.role = role;
        self
    }

    pub fn role(&self) -> TextRole {
        self.role
    }

    /// Override the size the theme gives this label's role.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size.max(0.0));
        self
    }

    /// Use a fixed color instead of the theme's text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color.assign_color(color);
        self.themed_color = false;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.measure_dirty = true;
        self.appearance_changed = true;
        self.texture_dirty = true;
        if let Some(texture) = self.texture.take() {
            self.retired.push(texture.id);
        }
    }

    pub fn font_size(&self, theme: &Theme) -> f32 {
        self.font_size.unwrap_or(match self.role {
            TextRole::Title => theme.typography.title_size,
            TextRole::Body => theme.typography.body_size,
            TextRole::Caption => theme.typography.caption_size,
        })
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Advance the tint. Returns whether the label looks different from the
    /// previous pass.
    pub(crate) fn advance(&mut self, elapsed_ms: i64) -> bool {
        let fading = self.color.is_translating() || self.color.is_animating();
        self.color.update(elapsed_ms);
        fading || std::mem::take(&mut self.appearance_changed)
    }

    pub(crate) fn needs_measure(&self) -> bool {
        self.measure_dirty
    }

    /// Text extent, or zero when no font provider is available.
    pub(crate) fn measure(&mut self, theme: &Theme, services: &Services) -> Size<f32> {
        self.measure_dirty = false;
        if self.text.is_empty() {
            return Size::new(0.0, 0.0);
        }
        match services.fonts.as_ref() {
            Some(fonts) => fonts.measure(&self.text, self.font_size(theme)),
            None => {
                self.warn_once("no font provider; label has zero size");
                Size::new(0.0, 0.0)
            }
        }
    }

    pub(crate) fn restyle(&mut self, theme: &Theme) {
        if self.themed_color {
            let color = match self.role {
                TextRole::Caption => theme.palette.text_secondary,
                TextRole::Title | TextRole::Body => theme.palette.text_primary,
            };
            self.color.assign_color(color);
        }
        self.texture_dirty = true;
        self.appearance_changed = true;
    }

    /// Blit the text with its top-left corner at `origin`.
    pub(crate) fn draw_text(
        &mut self,
        backend: &mut dyn RenderBackend,
        origin: (f32, f32),
        theme: &Theme,
        services: &Services,
    ) {
        for texture in self.retired.drain(..) {
            backend.destroy_texture(texture);
        }
        if self.text.is_empty() {
            return;
        }

        if self.texture_dirty || self.texture.is_none() {
            if let Some(stale) = self.texture.take() {
                backend.destroy_texture(stale.id);
            }
            self.texture_dirty = false;
            self.texture = self.rasterize(backend, theme, services);
        }

        let Some(texture) = self.texture else {
            return;
        };
        let dst = Rect::new(origin.0, origin.1, texture.width as f32, texture.height as f32);
        if let Err(err) = backend.copy_texture(
            texture.id,
            None,
            dst,
            self.color.rgb_bytes(),
            self.color.alpha_byte(),
        ) {
            tracing::warn!(%err, text = %self.text, "failed to draw label");
        }
    }

    fn rasterize(
        &mut self,
        backend: &mut dyn RenderBackend,
        theme: &Theme,
        services: &Services,
    ) -> Option<TextTexture> {
        let fonts = services.fonts.as_ref()?;
        let raster = match fonts.rasterize(&self.text, self.font_size(theme)) {
            Ok(raster) => raster,
            Err(err) => {
                self.warn_once(&format!("text rasterization failed: {err}"));
                return None;
            }
        };
        match backend.create_texture_from_pixels(raster.width, raster.height, &raster.pixels) {
            Ok(id) => Some(TextTexture {
                id,
                width: raster.width,
                height: raster.height,
            }),
            Err(err) => {
                self.warn_once(&format!("label texture creation failed: {err}"));
                None
            }
        }
    }

    pub(crate) fn retire(&mut self, retired: &mut Vec<TextureId>) {
        retired.append(&mut self.retired);
        if let Some(texture) = self.texture.take() {
            retired.push(texture.id);
        }
    }

    fn warn_once(&mut self, message: &str) {
        if !self.warned {
            self.warned = true;
            tracing::warn!(text = %self.text, "{message}");
        }
    }
}

impl WidgetHooks for Label {
    fn update(&mut self, parts: &mut Parts<'_>, ctx: &mut UpdateCtx<'_>) {
        if self.advance(ctx.elapsed_ms) {
            parts.base.request_redraw();
        }
        if self.measure_dirty {
            let size = self.measure(ctx.theme, ctx.services);
            parts.base.set_size(size.width, size.height);
        }
    }

    fn draw(&mut self, _parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        self.draw_text(ctx.backend, (ctx.rect.x, ctx.rect.y), ctx.theme, ctx.services);
    }

    fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        self.restyle(ctx.theme);
        let size = self.measure(ctx.theme, ctx.services);
        parts.base.set_size(size.width, size.height);
    }

    fn release_resources(&mut self, retired: &mut Vec<TextureId>) {
        self.retire(retired);
    }
}

impl From<Label> for Widget {
    fn from(label: Label) -> Self {
        Widget::new(WidgetKind::Label(label), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_picks_theme_size() {
        let theme = Theme::dark();
        assert_eq!(Label::new("a").font_size(&theme), theme.typography.body_size);
        assert_eq!(
            Label::new("a").with_role(TextRole::Title).font_size(&theme),
            theme.typography.title_size
        );
        assert_eq!(
            Label::new("a")
                .with_role(TextRole::Caption)
                .with_font_size(30.0)
                .font_size(&theme),
            30.0
        );
    }

    #[test]
    fn test_caption_uses_secondary_color() {
        let theme = Theme::dark();
        let mut caption = Label::new("a").with_role(TextRole::Caption);
        caption.restyle(&theme);
        assert_eq!(caption.color.color(), theme.palette.text_secondary);

        let mut fixed = Label::new("a").with_role(TextRole::Caption).with_color(Color::RED);
        fixed.restyle(&theme);
        assert_eq!(fixed.color.color(), Color::RED);
    }

    #[test]
    fn test_text_change_is_reported_once() {
        let mut label = Label::new("a");
        assert!(!label.advance(16));
        label.set_text("b");
        assert!(label.advance(16));
        assert!(!label.advance(16));
    }
}
