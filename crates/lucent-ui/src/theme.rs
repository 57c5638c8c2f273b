//! Injected style configuration.
//!
//! The tree holds an `Arc<Theme>` and hands it to every widget's refresh,
//! update and input hooks. Widgets re-read what they need on each
//! [`WidgetTree::refresh`](crate::WidgetTree::refresh) instead of caching it,
//! so swapping the theme restyles the whole tree.
//!
//! # Example
//!
//! ```
//! use lucent_render::Color;
//! use lucent_ui::Theme;
//!
//! let theme = Theme::builder()
//!     .primary(Color::from_rgb_u8(200, 80, 60))
//!     .padding(12.0)
//!     .long_press_ms(600)
//!     .build();
//!
//! assert_eq!(theme.spacing.padding, 12.0);
//! assert_eq!(theme.timing.long_press_ms, 600);
//! ```

use lucent_render::Color;

/// Semantic colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub primary: Color,
    /// Panels, buttons and other raised elements.
    pub surface: Color,
    pub surface_hover: Color,
    pub surface_pressed: Color,
    /// Unfilled part of sliders and toggles.
    pub track: Color,
    pub border: Color,
    pub shadow: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl ColorPalette {
    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgb_u8(60, 120, 200),
            surface: Color::from_rgb_u8(30, 30, 30),
            surface_hover: Color::from_rgb_u8(45, 45, 45),
            surface_pressed: Color::from_rgb_u8(60, 60, 60),
            track: Color::from_rgb_u8(70, 70, 70),
            border: Color::from_rgb_u8(60, 60, 60),
            shadow: Color::from_rgba_u8(0, 0, 0, 120),
            text_primary: Color::from_rgb_u8(255, 255, 255),
            text_secondary: Color::from_rgb_u8(180, 180, 180),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::from_rgb_u8(50, 100, 200),
            surface: Color::from_rgb_u8(255, 255, 255),
            surface_hover: Color::from_rgb_u8(238, 238, 238),
            surface_pressed: Color::from_rgb_u8(220, 220, 220),
            track: Color::from_rgb_u8(200, 200, 200),
            border: Color::from_rgb_u8(200, 200, 200),
            shadow: Color::from_rgba_u8(0, 0, 0, 50),
            text_primary: Color::from_rgb_u8(0, 0, 0),
            text_secondary: Color::from_rgb_u8(100, 100, 100),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Layout constants, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Inner padding of buttons and other framed widgets.
    pub padding: f32,
    pub margin: f32,
    pub corner_radius: f32,
    pub border_width: f32,
    /// Drop shadow offset.
    pub shadow_width: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            padding: 8.0,
            margin: 4.0,
            corner_radius: 4.0,
            border_width: 1.0,
            shadow_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub title_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_size: 24.0,
            body_size: 14.0,
            caption_size: 11.0,
        }
    }
}

/// Durations and input thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Hover and press feedback.
    pub short_transition_ms: i64,
    pub long_transition_ms: i64,
    /// Hold time after which a press reports a long-press instead of a click.
    pub long_press_ms: u64,
    /// Cursor travel, in pixels, that turns a held press into a drag.
    pub drag_threshold: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            short_transition_ms: 120,
            long_transition_ms: 400,
            long_press_ms: 1000,
            drag_threshold: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    pub palette: ColorPalette,
    pub spacing: Spacing,
    pub typography: Typography,
    pub timing: Timing,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            palette: ColorPalette::dark(),
            ..Default::default()
        }
    }

    pub fn light() -> Self {
        Self {
            palette: ColorPalette::light(),
            ..Default::default()
        }
    }

    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::new()
    }

    /// Copy with every spacing and font size multiplied by `factor`, for DPI
    /// changes. Non-positive or non-finite factors return an unscaled copy.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut theme = self.clone();
        if !factor.is_finite() || factor <= 0.0 {
            return theme;
        }
        let s = &mut theme.spacing;
        s.padding *= factor;
        s.margin *= factor;
        s.corner_radius *= factor;
        s.border_width *= factor;
        s.shadow_width *= factor;
        let t = &mut theme.typography;
        t.title_size *= factor;
        t.body_size *= factor;
        t.caption_size *= factor;
        theme.timing.drag_threshold *= factor;
        theme
    }
}

/// Builder for themes that only override a few values.
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    pub fn new() -> Self {
        Self {
            theme: Theme::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            theme: Theme::light(),
        }
    }

    pub fn primary(mut self, color: Color) -> Self {
        self.theme.palette.primary = color;
        self
    }

    pub fn surface(mut self, color: Color) -> Self {
        self.theme.palette.surface = color;
        self
    }

    pub fn text(mut self, color: Color) -> Self {
        self.theme.palette.text_primary = color;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.theme.spacing.padding = padding;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.theme.spacing.corner_radius = radius;
        self
    }

    pub fn body_size(mut self, size: f32) -> Self {
        self.theme.typography.body_size = size;
        self
    }

    pub fn long_press_ms(mut self, ms: u64) -> Self {
        self.theme.timing.long_press_ms = ms;
        self
    }

    pub fn drag_threshold(mut self, pixels: f32) -> Self {
        self.theme.timing.drag_threshold = pixels;
        self
    }

    pub fn palette(mut self, palette: ColorPalette) -> Self {
        self.theme.palette = palette;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.theme.spacing = spacing;
        self
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.theme.typography = typography;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.theme.timing = timing;
        self
    }

    pub fn build(self) -> Theme {
        self.theme
    }
}

impl Default for ThemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
