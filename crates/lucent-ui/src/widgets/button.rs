use lucent_input::{KeyCode, KeyPress};
use lucent_render::{Color, TextureId};

use super::Label;
use crate::event::WidgetEvent;
use crate::panel::Panel;
use crate::pointer::{MouseState, PointerEvents};
use crate::theme::Theme;
use crate::widget::{
    DrawCtx, InputCtx, Parts, RefreshCtx, Services, UpdateCtx, Widget, WidgetHooks, WidgetKind,
};

/// A framed label that reacts to hover and press.
///
/// The frame is the widget's [`Panel`] background; its fill color glides
/// between the theme's surface colors as the pointer enters, presses and
/// leaves. Clicks arrive through the usual [`EventKind::Click`] callbacks.
///
/// [`EventKind::Click`]: crate::EventKind::Click
#[derive(Debug)]
pub struct Button {
    label: Label,
    hovered: bool,
    pressed: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Label::new(text),
            hovered: false,
            pressed: false,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn fill_color(&self, theme: &Theme) -> Color {
        let palette = &theme.palette;
        if self.pressed {
            palette.surface_pressed
        } else if self.hovered {
            palette.surface_hover
        } else {
            palette.surface
        }
    }

    /// Size the frame around the label.
    fn layout(&mut self, parts: &mut Parts<'_>, theme: &Theme, services: &Services) {
        let text = self.label.measure(theme, services);
        let padding = theme.spacing.padding;
        let width = text.width + padding * 2.0;
        let height = text.height + padding * 2.0;
        if let Some(panel) = parts.panel.as_deref_mut() {
            panel.set_fixed_size(true, width, height);
        }
        parts.base.set_size(width, height);
    }
}

impl WidgetHooks for Button {
    fn update(&mut self, parts: &mut Parts<'_>, ctx: &mut UpdateCtx<'_>) {
        if self.label.advance(ctx.elapsed_ms) {
            parts.base.request_redraw();
        }
        if self.label.needs_measure() {
            self.layout(parts, ctx.theme, ctx.services);
        }
    }

    fn draw(&mut self, _parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        let padding = ctx.theme.spacing.padding;
        let origin = (ctx.rect.x + padding, ctx.rect.y + padding);
        self.label.draw_text(ctx.backend, origin, ctx.theme, ctx.services);
    }

    fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        let theme = ctx.theme;
        self.label.restyle(theme);
        if let Some(panel) = parts.panel.as_deref_mut() {
            panel.set_fill_bg(true, self.fill_color(theme));
            panel.set_border(true, theme.palette.border, theme.spacing.border_width);
            panel.set_corner_radius(theme.spacing.corner_radius > 0.0, theme.spacing.corner_radius);
        }
        self.layout(parts, theme, ctx.services);
    }

    fn mouse(&mut self, parts: &mut Parts<'_>, state: &MouseState, ctx: &mut InputCtx<'_>) -> bool {
        let transitions = PointerEvents::ENTER
            | PointerEvents::EXIT
            | PointerEvents::PRESS
            | PointerEvents::RELEASE;
        if !state.events.intersects(transitions) {
            return false;
        }

        self.hovered = state.is_entered;
        self.pressed = state.is_entered && state.is_held;
        let color = self.fill_color(ctx.theme);
        // Leaving fades out slowly; everything else reacts quickly.
        let duration = if self.hovered {
            ctx.theme.timing.short_transition_ms
        } else {
            ctx.theme.timing.long_transition_ms
        };
        if let Some(panel) = parts.panel.as_deref_mut() {
            panel.bg_color.translate_color(color, duration);
        }
        false
    }

    fn key(&mut self, _parts: &mut Parts<'_>, key: KeyPress, ctx: &mut InputCtx<'_>) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Space => {
                ctx.emit(WidgetEvent::Click);
                true
            }
            _ => false,
        }
    }

    fn release_resources(&mut self, retired: &mut Vec<TextureId>) {
        self.label.retire(retired);
    }
}

impl From<Button> for Widget {
    fn from(button: Button) -> Self {
        Widget::new(WidgetKind::Button(button), Some(Panel::new())).focusable(true)
    }
}
