use lucent_core::geometry::Rect;
use lucent_input::{KeyCode, KeyPress};

use crate::event::WidgetEvent;
use crate::pointer::{MouseState, PointerEvents};
use crate::widget::{DrawCtx, InputCtx, Parts, RefreshCtx, Widget, WidgetHooks, WidgetKind};

const DEFAULT_STEP: f32 = 0.05;

/// A horizontal value picker over `0.0..=1.0`.
///
/// The value follows the pointer while the left button is held, moves by one
/// step per wheel notch while hovered and responds to the arrow, Home and End
/// keys while focused. Every change emits [`WidgetEvent::ValueChanged`].
#[derive(Debug)]
pub struct Slider {
    value: f32,
    step: f32,
    length: f32,
}

impl Slider {
    pub fn new(length: f32) -> Self {
        Self {
            value: 0.0,
            step: DEFAULT_STEP,
            length: length.max(0.0),
        }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value without emitting an event. Out-of-range input is clamped.
    pub fn set_value(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value.clamp(0.0, 1.0);
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    fn change_to(&mut self, value: f32, parts: &mut Parts<'_>, ctx: &mut InputCtx<'_>) {
        let previous = self.value;
        self.set_value(value);
        if self.value != previous {
            parts.base.request_redraw();
            ctx.emit(WidgetEvent::ValueChanged(self.value));
        }
    }
}

impl WidgetHooks for Slider {
    fn draw(&mut self, _parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        let rect = ctx.rect;
        if rect.is_empty() {
            return;
        }
        let palette = &ctx.theme.palette;
        let track_height = (rect.height / 4.0).max(1.0);
        let track = Rect::new(
            rect.x,
            rect.y + (rect.height - track_height) / 2.0,
            rect.width,
            track_height,
        );
        let radius = track_height / 2.0;
        ctx.backend.draw_filled_rect(track, palette.track, radius);

        let filled = Rect::new(track.x, track.y, track.width * self.value, track.height);
        if !filled.is_empty() {
            ctx.backend.draw_filled_rect(filled, palette.primary, radius);
        }

        let thumb = rect.height;
        let thumb_x = rect.x + (rect.width - thumb).max(0.0) * self.value;
        ctx.backend.draw_filled_rect(
            Rect::new(thumb_x, rect.y, thumb, thumb),
            palette.text_primary,
            thumb / 2.0,
        );
    }

    fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        let theme = ctx.theme;
        parts
            .base
            .set_size(self.length, theme.typography.body_size + theme.spacing.padding);
    }

    fn mouse(&mut self, parts: &mut Parts<'_>, state: &MouseState, ctx: &mut InputCtx<'_>) -> bool {
        let width = parts.base.width();
        if width > 0.0 && (state.events.contains(PointerEvents::PRESS) || state.is_held) {
            self.change_to(state.local.x / width, parts, ctx);
        }

        if state.is_entered && state.has_wheel() {
            let notches = state.wheel_up as f32 - state.wheel_down as f32;
            self.change_to(self.value + notches * self.step, parts, ctx);
            return true;
        }
        false
    }

    fn key(&mut self, parts: &mut Parts<'_>, key: KeyPress, ctx: &mut InputCtx<'_>) -> bool {
        let value = match key.code {
            KeyCode::Left | KeyCode::Down => self.value - self.step,
            KeyCode::Right | KeyCode::Up => self.value + self.step,
            KeyCode::Home => 0.0,
            KeyCode::End => 1.0,
            _ => return false,
        };
        self.change_to(value, parts, ctx);
        true
    }
}

impl From<Slider> for Widget {
    fn from(slider: Slider) -> Self {
        Widget::new(WidgetKind::Slider(slider), None).focusable(true)
    }
}
