use std::any::Any;
use std::sync::Arc;

use lucent_core::geometry::Rect;
use lucent_input::KeyPress;
use lucent_render::{FontProvider, RenderBackend, RenderTarget, SpriteCache, TextureId};

use super::{WidgetBase, WidgetHandle};
use crate::commands::Commands;
use crate::event::WidgetEvent;
use crate::panel::Panel;
use crate::pointer::MouseState;
use crate::theme::Theme;
use crate::widgets::{Button, Image, Label, Slider, Toggle};

/// External collaborators widgets may consult.
#[derive(Clone, Default)]
pub struct Services {
    pub fonts: Option<Arc<dyn FontProvider>>,
    pub sprites: Option<Arc<dyn SpriteCache>>,
}

impl Services {
    pub fn with_fonts(mut self, fonts: Arc<dyn FontProvider>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn with_sprites(mut self, sprites: Arc<dyn SpriteCache>) -> Self {
        self.sprites = Some(sprites);
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("fonts", &self.fonts.is_some())
            .field("sprites", &self.sprites.is_some())
            .finish()
    }
}

/// The shared state a hook operates on.
pub struct Parts<'a> {
    pub base: &'a mut WidgetBase,
    /// Present for container kinds.
    pub panel: Option<&'a mut Panel>,
}

pub struct UpdateCtx<'a> {
    pub handle: WidgetHandle,
    pub elapsed_ms: i64,
    pub theme: &'a Theme,
    pub services: &'a Services,
    pub commands: &'a mut Commands,
}

pub struct DrawCtx<'a> {
    pub handle: WidgetHandle,
    pub backend: &'a mut dyn RenderBackend,
    /// Where this pass is drawing; offscreen while filling a panel's cache.
    pub target: RenderTarget,
    /// The widget's rect in `target` coordinates.
    pub rect: Rect<f32>,
    pub theme: &'a Theme,
    pub services: &'a Services,
}

pub struct RefreshCtx<'a> {
    pub theme: &'a Theme,
    pub services: &'a Services,
}

pub struct InputCtx<'a> {
    pub handle: WidgetHandle,
    pub theme: &'a Theme,
    pub commands: &'a mut Commands,
    pub(crate) emitted: &'a mut Vec<WidgetEvent>,
}

impl InputCtx<'_> {
    /// Deliver `event` to this widget's callbacks once the hook returns.
    pub fn emit(&mut self, event: WidgetEvent) {
        self.emitted.push(event);
    }
}

/// Per-phase behaviour of a widget kind. Every method has a no-op default.
pub trait WidgetHooks: Any + Send {
    /// Runs after the base has advanced its position and screen coordinates.
    fn update(&mut self, _parts: &mut Parts<'_>, _ctx: &mut UpdateCtx<'_>) {}

    /// Runs after the panel background and before any children.
    fn draw(&mut self, _parts: &mut Parts<'_>, _ctx: &mut DrawCtx<'_>) {}

    /// Re-read theme values and recompute size-dependent layout.
    fn refresh(&mut self, _parts: &mut Parts<'_>, _ctx: &RefreshCtx<'_>) {}

    /// Returns whether the widget consumed the wheel.
    fn mouse(&mut self, _parts: &mut Parts<'_>, _state: &MouseState, _ctx: &mut InputCtx<'_>) -> bool {
        false
    }

    /// Returns whether the key was consumed, which stops it bubbling.
    fn key(&mut self, _parts: &mut Parts<'_>, _key: KeyPress, _ctx: &mut InputCtx<'_>) -> bool {
        false
    }

    /// Hand over textures this widget created so they are destroyed on the next draw.
    fn release_resources(&mut self, _retired: &mut Vec<TextureId>) {}
}

/// The closed set of widget kinds.
pub enum WidgetKind {
    /// A plain container.
    Panel,
    Label(Label),
    Image(Image),
    Button(Button),
    Toggle(Toggle),
    Slider(Slider),
    Custom(Box<dyn WidgetHooks>),
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Panel => "Panel",
            WidgetKind::Label(_) => "Label",
            WidgetKind::Image(_) => "Image",
            WidgetKind::Button(_) => "Button",
            WidgetKind::Toggle(_) => "Toggle",
            WidgetKind::Slider(_) => "Slider",
            WidgetKind::Custom(_) => "Custom",
        }
    }

    fn hooks(&mut self) -> Option<&mut dyn WidgetHooks> {
        match self {
            WidgetKind::Panel => None,
            WidgetKind::Label(w) => Some(w),
            WidgetKind::Image(w) => Some(w),
            WidgetKind::Button(w) => Some(w),
            WidgetKind::Toggle(w) => Some(w),
            WidgetKind::Slider(w) => Some(w),
            WidgetKind::Custom(w) => Some(w.as_mut()),
        }
    }

    pub(crate) fn update(&mut self, parts: &mut Parts<'_>, ctx: &mut UpdateCtx<'_>) {
        if let Some(hooks) = self.hooks() {
            hooks.update(parts, ctx);
        }
    }

    pub(crate) fn draw(&mut self, parts: &mut Parts<'_>, ctx: &mut DrawCtx<'_>) {
        if let Some(hooks) = self.hooks() {
            hooks.draw(parts, ctx);
        }
    }

    pub(crate) fn refresh(&mut self, parts: &mut Parts<'_>, ctx: &RefreshCtx<'_>) {
        if let Some(hooks) = self.hooks() {
            hooks.refresh(parts, ctx);
        }
    }

    pub(crate) fn mouse(&mut self, parts: &mut Parts<'_>, state: &MouseState, ctx: &mut InputCtx<'_>) -> bool {
        self.hooks().is_some_and(|hooks| hooks.mouse(parts, state, ctx))
    }

    pub(crate) fn key(&mut self, parts: &mut Parts<'_>, key: KeyPress, ctx: &mut InputCtx<'_>) -> bool {
        self.hooks().is_some_and(|hooks| hooks.key(parts, key, ctx))
    }

    pub(crate) fn release_resources(&mut self, retired: &mut Vec<TextureId>) {
        if let Some(hooks) = self.hooks() {
            hooks.release_resources(retired);
        }
    }

    /// Downcast a [`WidgetKind::Custom`] payload.
    pub fn custom<T: WidgetHooks>(&self) -> Option<&T> {
        match self {
            WidgetKind::Custom(hooks) => {
                let any: &dyn Any = &**hooks;
                any.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    pub fn custom_mut<T: WidgetHooks>(&mut self) -> Option<&mut T> {
        match self {
            WidgetKind::Custom(hooks) => {
                let any: &mut dyn Any = &mut **hooks;
                any.downcast_mut::<T>()
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed access to a built-in kind through [`WidgetTree::get`](crate::WidgetTree::get).
pub trait WidgetType: Sized + 'static {
    fn from_kind(kind: &WidgetKind) -> Option<&Self>;
    fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self>;
}

macro_rules! impl_widget_type {
    ($($variant:ident),* $(,)?) => {
        $(
            impl WidgetType for $variant {
                fn from_kind(kind: &WidgetKind) -> Option<&Self> {
                    match kind {
                        WidgetKind::$variant(w) => Some(w),
                        _ => None,
                    }
                }

                fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self> {
                    match kind {
                        WidgetKind::$variant(w) => Some(w),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_widget_type!(Label, Image, Button, Toggle, Slider);
