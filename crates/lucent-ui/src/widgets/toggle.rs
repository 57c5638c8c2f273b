use lucent_core::geometry::Rect;
use lucent_input::{KeyCode, KeyPress};

use crate::animation::AnimatedPosition;
use crate::event::WidgetEvent;
use crate::pointer::{MouseState, PointerEvents};
use crate::widget::{DrawCtx, InputCtx, Parts, RefreshCtx, UpdateCtx, Widget, WidgetHooks, WidgetKind};

/// An on/off switch: a rounded track with a knob that slides between its ends.
///
/// Clicking, or pressing Space or Enter while focused, flips the state and
/// emits [`WidgetEvent::StateChanged`].
#[derive(Debug)]
pub struct Toggle {
    is_on: bool,
    /// Knob offset from the left end of the track.
    knob: AnimatedPosition,
    snap_knob: bool,
}

impl Toggle {
    pub fn new(is_on: bool) -> Self {
        Self {
            is_on,
            knob: AnimatedPosition::default(),
            snap_knob: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Set the state without an event; the knob jumps to its end.
    pub fn set_on(&mut self, is_on: bool) {
        self.is_on = is_on;
        self.snap_knob = true;
    }

    pub fn knob_offset(&self) -> f32 {
        self.knob.x()
    }

    fn knob_target(&self, width: f32, height: f32) -> f32 {
        if self.is_on { (width - height).max(0.0) } else { 0.0 }
    }

    fn flip(&mut self, parts: &mut Parts<'_>, ctx: &mut InputCtx<'_>) {
        self.is_on = !self.is_on;
        parts.base.request_redraw();
        let target = self.knob_target(parts.base.width(), parts.base.height());
        self.knob
            .translate(target, 0.0, ctx.theme.timing.short_transition_ms);
        tracing::debug!(handle = %ctx.handle, is_on = self.is_on, "toggle flipped");
        ctx.emit(WidgetEvent::StateChanged(self.is_on));
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WidgetHooks for Toggle {
    fn update(&mut self, parts: &mut Parts<'_>, ctx: &mut UpdateCtx<'_>) {
        if self.snap_knob {
            self.snap_knob = false;
            let target = self.knob_target(parts.base.width(), parts.base.height());
            self.knob.assign(target, 0.0);
            parts.base.request_redraw();
        }
        if self.knob.is_translating() {
            parts.base.request_redraw();
        }
        self.knob.update(ctx.elapsed_ms);
    }

    fn draw(&mut self, _parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        let rect = ctx.rect;
        if rect.is_empty() {
            return;
        }
        let palette = &ctx.theme.palette;
        let track = if self.is_on { palette.primary } else { palette.track };
        let radius = rect.height / 2.0;
        ctx.backend.draw_filled_rect(rect, track, radius);

        let inset = (ctx.theme.spacing.margin * 0.5).min(rect.height * 0.25);
        let knob = Rect::new(rect.x + self.knob.x(), rect.y, rect.height, rect.height).inset(inset);
        ctx.backend
            .draw_filled_rect(knob, palette.text_primary, knob.height / 2.0);
    }

    fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        let theme = ctx.theme;
        let height = theme.typography.body_size + theme.spacing.padding;
        parts.base.set_size(height * 2.0, height);
        self.snap_knob = true;
    }

    fn mouse(&mut self, parts: &mut Parts<'_>, state: &MouseState, ctx: &mut InputCtx<'_>) -> bool {
        if state.events.contains(PointerEvents::CLICK) {
            self.flip(parts, ctx);
        }
        false
    }

    fn key(&mut self, parts: &mut Parts<'_>, key: KeyPress, ctx: &mut InputCtx<'_>) -> bool {
        match key.code {
            KeyCode::Space | KeyCode::Enter => {
                self.flip(parts, ctx);
                true
            }
            _ => false,
        }
    }
}

impl From<Toggle> for Widget {
    fn from(toggle: Toggle) -> Self {
        Widget::new(WidgetKind::Toggle(toggle), None).focusable(true)
    }
}
