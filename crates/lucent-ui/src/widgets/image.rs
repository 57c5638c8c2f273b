use lucent_render::{Color, Sprite};

use crate::animation::AnimatedColor;
use crate::widget::{
    DrawCtx, Parts, RefreshCtx, Services, UpdateCtx, Widget, WidgetBase, WidgetHooks, WidgetKind,
};

/// A sprite frame looked up by path through the [`SpriteCache`](lucent_render::SpriteCache).
///
/// A missing sprite leaves the widget at zero size, and it picks the sprite up
/// on a later refresh once the cache has it.
#[derive(Debug)]
pub struct Image {
    path: String,
    frame: u32,
    scale: f32,
    pub tint: AnimatedColor,
    sprite: Option<Sprite>,
    needs_resolve: bool,
    warned: bool,
}

impl Image {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frame: 0,
            scale: 1.0,
            tint: AnimatedColor::new(Color::WHITE),
            sprite: None,
            needs_resolve: true,
            warned: false,
        }
    }

    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn set_frame(&mut self, frame: u32) {
        if frame != self.frame {
            self.frame = frame;
            self.needs_resolve = true;
        }
    }

    pub fn sprite(&self) -> Option<Sprite> {
        self.sprite
    }

    fn resolve(&mut self, base: &mut WidgetBase, services: &Services) {
        self.needs_resolve = false;
        base.request_redraw();
        self.sprite = services
            .sprites
            .as_ref()
            .and_then(|cache| cache.sprite(&self.path, self.frame));

        match self.sprite {
            Some(sprite) => {
                base.set_size(sprite.width as f32 * self.scale, sprite.height as f32 * self.scale);
            }
            None => {
                if !self.warned {
                    self.warned = true;
                    tracing::warn!(path = %self.path, frame = self.frame, "sprite not found");
                }
                base.set_size(0.0, 0.0);
            }
        }
    }
}

impl WidgetHooks for Image {
    fn update(&mut self, parts: &mut Parts<'_>, ctx: &mut UpdateCtx<'_>) {
        if self.tint.is_translating() || self.tint.is_animating() {
            parts.base.request_redraw();
        }
        self.tint.update(ctx.elapsed_ms);
        if self.needs_resolve {
            self.resolve(parts.base, ctx.services);
        }
    }

    fn draw(&mut self, _parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        let Some(sprite) = self.sprite else {
            return;
        };
        if ctx.rect.is_empty() {
            return;
        }
        if let Err(err) = ctx.backend.copy_texture(
            sprite.texture,
            None,
            ctx.rect,
            self.tint.rgb_bytes(),
            self.tint.alpha_byte(),
        ) {
            tracing::warn!(%err, path = %self.path, "failed to draw sprite");
        }
    }

    fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        self.resolve(parts.base, ctx.services);
    }
}

impl From<Image> for Widget {
    fn from(image: Image) -> Self {
        Widget::new(WidgetKind::Image(image), None)
    }
}
