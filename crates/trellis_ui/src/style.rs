//! Colors, theme and per-widget styles.
//!
//! Styles are plain data with optional fields. Widgets that accept them
//! implement [`crate::widgets::StyleTarget`] and copy the fields they
//! understand; nothing is looked up by name at runtime.

use serde::Deserialize;

/// RGBA color.
///
/// Deserialises from `"#RRGGBB"`, `"#RRGGBBAA"` or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::hex((value << 8) | 0xFF)),
            8 => Some(Self::hex(value)),
            _ => None,
        }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Array([f32; 4]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(text) => Self::parse_hex(&text).ok_or_else(|| format!("invalid hex color '{text}'")),
            ColorRepr::Array([r, g, b, a]) => Ok(Self::rgba(r, g, b, a)),
        }
    }
}

/// Palette used by widgets that were not given an explicit style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Scene background.
    pub background: Color,
    /// Panels, frames and list backgrounds.
    pub surface: Color,
    /// Buttons at rest.
    pub primary: Color,
    /// Buttons under the pointer.
    pub hover: Color,
    /// Buttons held down.
    pub pressed: Color,
    /// Text.
    pub text: Color,
    /// Borders.
    pub border: Color,
    /// Scrollbar track.
    pub track: Color,
    /// Scrollbar thumb.
    pub thumb: Color,
}

impl Theme {
    /// Dark default palette.
    pub const DARK: Self = Self {
        background: Color::rgba(0.02, 0.02, 0.03, 1.0),
        surface: Color::rgba(0.07, 0.07, 0.09, 0.95),
        primary: Color::rgba(0.16, 0.36, 0.62, 1.0),
        hover: Color::rgba(0.22, 0.46, 0.78, 1.0),
        pressed: Color::rgba(0.10, 0.24, 0.44, 1.0),
        text: Color::rgba(0.9, 0.9, 0.9, 1.0),
        border: Color::rgba(0.25, 0.27, 0.3, 1.0),
        track: Color::rgba(0.1, 0.1, 0.12, 1.0),
        thumb: Color::rgba(0.45, 0.47, 0.5, 1.0),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

/// Named visual overrides. Unset fields leave a widget unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Fill color.
    pub background: Option<Color>,
    /// Text, tint or thumb color.
    pub foreground: Option<Color>,
    /// Border color.
    pub border: Option<Color>,
    /// Border thickness in pixels.
    pub border_thickness: Option<f32>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Fill while hovered.
    pub hover: Option<Color>,
    /// Fill while pressed.
    pub pressed: Option<Color>,
}
