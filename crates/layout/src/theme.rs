use folio_types::{Color, FontWeight};
use serde::Deserialize;

/// Colors for the dark CV theme.
///
/// Deserializes from JSON with hex strings or `{r, g, b}` maps; fields left
/// out keep their [`Theme::dark`] value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub frame: Color,
    pub card_fill: Color,
    pub card_border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub accent_tertiary: Color,
    pub badge_fill: Color,
    pub chip_fill: Color,
    pub chip_border: Color,
    pub success: Color,
    pub warning: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x0b, 0x0f, 0x17),
            frame: Color::rgb(0x1a, 0x22, 0x34),
            card_fill: Color::rgb(0x11, 0x18, 0x27),
            card_border: Color::rgb(0x1f, 0x29, 0x37),
            text: Color::rgb(0xe9, 0xf1, 0xff),
            muted: Color::rgb(0x9c, 0xa3, 0xaf),
            accent: Color::rgb(0x00, 0xd4, 0xff),
            accent_secondary: Color::rgb(0xa8, 0x55, 0xf7),
            accent_tertiary: Color::rgb(0xec, 0x48, 0x99),
            badge_fill: Color::rgb(0x0e, 0x2a, 0x3a),
            chip_fill: Color::rgb(0x16, 0x1f, 0x33),
            chip_border: Color::rgb(0x2b, 0x36, 0x4d),
            success: Color::rgb(0x22, 0xc5, 0x5e),
            warning: Color::rgb(0xf5, 0x9e, 0x0b),
        }
    }

    /// The three accent colors, left to right, used for bars.
    pub fn accent_stops(&self) -> [Color; 3] {
        [self.accent, self.accent_secondary, self.accent_tertiary]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Size (points), weight and color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn regular(size: f32, color: Color) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color,
        }
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
            color,
        }
    }
}
