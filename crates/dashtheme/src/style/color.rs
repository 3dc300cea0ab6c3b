//! Color literal parsing.
//!
//! Validation uses the `cssparser` color grammar, so every form a browser
//! accepts is accepted here:
//!
//! - **Hex**: `#fff`, `#ffff`, `#4CAF50`, `#4CAF50CC`
//! - **Functional**: `rgb(76, 175, 80)`, `rgba(0 0 0 / 30%)`, `hsl(120, 50%, 50%)`,
//!   `hwb()`, `lab()`, `oklch()`, `color()`
//! - **Keywords**: the full named-color table, `transparent` and `currentColor`
//!
//! Parsing validates the literal; the authored text is what gets emitted, so
//! `#4CAF50` stays `#4CAF50` rather than being normalized.

use cssparser::{Parser, ParserInput};

/// A parsed sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// CSS-wide keywords, valid wherever a color is.
const WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Parses a color literal.
    ///
    /// Returns `Ok(None)` for valid colors without fixed sRGB channels:
    /// `currentColor`, the CSS-wide keywords, and colors given in another
    /// color space (`lab()`, `oklch()`, `color(display-p3 ...)`).
    pub fn parse(s: &str) -> Result<Option<Self>, String> {
        let s = s.trim();
        if WIDE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s)) {
            return Ok(None);
        }

        let mut input = ParserInput::new(s);
        let mut parser = Parser::new(&mut input);
        let parsed = parser
            .parse_entirely(cssparser::Color::parse)
            .map_err(|_| format!("'{}' is not a color", s))?;
        Ok(Self::from_css(parsed))
    }

    /// Returns true if `s` parses as a color literal.
    pub fn is_color(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    fn from_css(color: cssparser::Color) -> Option<Self> {
        use cssparser::Color as Css;

        let (red, green, blue, alpha) = match color {
            Css::Rgba(rgba) => {
                let channel = |c: Option<u8>| f32::from(c.unwrap_or(0)) / 255.0;
                (
                    channel(rgba.red),
                    channel(rgba.green),
                    channel(rgba.blue),
                    rgba.alpha,
                )
            }
            Css::Hsl(hsl) => {
                let (r, g, b) = cssparser::hsl_to_rgb(
                    hsl.hue.unwrap_or(0.0) / 360.0,
                    hsl.saturation.unwrap_or(0.0),
                    hsl.lightness.unwrap_or(0.0),
                );
                (r, g, b, hsl.alpha)
            }
            Css::Hwb(hwb) => {
                let (r, g, b) = cssparser::hwb_to_rgb(
                    hwb.hue.unwrap_or(0.0) / 360.0,
                    hwb.whiteness.unwrap_or(0.0),
                    hwb.blackness.unwrap_or(0.0),
                );
                (r, g, b, hwb.alpha)
            }
            Css::CurrentColor
            | Css::Lab(_)
            | Css::Lch(_)
            | Css::Oklab(_)
            | Css::Oklch(_)
            | Css::ColorFunction(_) => return None,
        };

        Some(Color {
            r: unit_to_byte(red),
            g: unit_to_byte(green),
            b: unit_to_byte(blue),
            a: unit_to_byte(alpha.unwrap_or(0.0)),
        })
    }
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
