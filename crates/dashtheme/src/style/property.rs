//! The CSS properties a theme rule may assign.
//!
//! The set is closed: a rule naming anything else fails at load time instead
//! of being passed through to the page unchecked.

use std::fmt;
use std::str::FromStr;

/// What a property's value must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A single color.
    Color,
    /// Anything else (lengths, shorthands, keywords, shadows).
    Free,
}

macro_rules! properties {
    ($( $variant:ident => $css:literal, $kind:ident; )+) => {
        /// A themable CSS property.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Property {
            $( $variant, )+
        }

        impl Property {
            /// Every supported property.
            pub const ALL: &'static [Property] = &[ $( Property::$variant, )+ ];

            /// The CSS property name.
            pub fn css_name(self) -> &'static str {
                match self {
                    $( Property::$variant => $css, )+
                }
            }

            pub fn value_kind(self) -> ValueKind {
                match self {
                    $( Property::$variant => ValueKind::$kind, )+
                }
            }
        }
    };
}

properties! {
    Color => "color", Color;
    Background => "background", Free;
    BackgroundColor => "background-color", Color;
    Border => "border", Free;
    BorderColor => "border-color", Color;
    BorderWidth => "border-width", Free;
    BorderStyle => "border-style", Free;
    BorderTop => "border-top", Free;
    BorderBottom => "border-bottom", Free;
    BorderBottomColor => "border-bottom-color", Color;
    BorderLeft => "border-left", Free;
    BorderLeftColor => "border-left-color", Color;
    BorderLeftWidth => "border-left-width", Free;
    BorderLeftStyle => "border-left-style", Free;
    BorderRadius => "border-radius", Free;
    Outline => "outline", Free;
    OutlineColor => "outline-color", Color;
    BoxShadow => "box-shadow", Free;
    Padding => "padding", Free;
    Margin => "margin", Free;
    Gap => "gap", Free;
    FontFamily => "font-family", Free;
    FontSize => "font-size", Free;
    FontWeight => "font-weight", Free;
    LineHeight => "line-height", Free;
    LetterSpacing => "letter-spacing", Free;
    TextTransform => "text-transform", Free;
    TextAlign => "text-align", Free;
    Transition => "transition", Free;
    Cursor => "cursor", Free;
    Opacity => "opacity", Free;
    Display => "display", Free;
    Width => "width", Free;
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.css_name() == lower)
            .ok_or_else(|| format!("unknown property '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names_are_unique() {
        let mut names: Vec<_> = Property::ALL.iter().map(|p| p.css_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Property::ALL.len());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Background-Color".parse::<Property>(),
            Ok(Property::BackgroundColor)
        );
    }

    #[test]
    fn test_unknown_property() {
        assert!("float".parse::<Property>().is_err());
    }

    #[test]
    fn test_color_kinds() {
        assert_eq!(Property::BorderLeftColor.value_kind(), ValueKind::Color);
        assert_eq!(Property::BorderLeft.value_kind(), ValueKind::Free);
    }
}
