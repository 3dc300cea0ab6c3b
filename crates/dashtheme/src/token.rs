//! Design tokens and the immutable token table.
//!
//! A token is a named literal (`--primary-color: #4CAF50`). Rules refer to
//! tokens with `var(--primary-color)`. Token values are literals only: a token
//! referring to another token is rejected, so every reference resolves with a
//! single lookup.

use std::collections::HashMap;

use crate::error::{Result, ThemeError};
use crate::style::{Color, PropertyValue};

const DIMENSION_UNITS: &[&str] = &[
    "px", "rem", "em", "%", "vh", "vw", "pt", "ch", "ms", "s", "deg", "fr",
];

/// Broad classification of a token's literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A color literal (`#4CAF50`, `rgba(...)`, `white`).
    Color,
    /// A single number with a unit (`8px`, `0.3s`) or a bare `0`.
    Dimension,
    /// Anything else: shadows, font stacks, multi-part shorthands.
    Other,
}

impl TokenKind {
    fn classify(literal: &str) -> Self {
        if Color::is_color(literal) {
            TokenKind::Color
        } else if is_dimension(literal) {
            TokenKind::Dimension
        } else {
            TokenKind::Other
        }
    }
}

fn is_dimension(s: &str) -> bool {
    let number_end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(number_end);
    if number.parse::<f64>().is_err() {
        return false;
    }
    if unit.is_empty() {
        return number.parse::<f64>() == Ok(0.0);
    }
    DIMENSION_UNITS.contains(&unit.to_ascii_lowercase().as_str())
}

/// A named design value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToken {
    name: String,
    value: String,
    kind: TokenKind,
}

impl ThemeToken {
    /// Token name without the `--` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The literal as written.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The parsed color, for color tokens with fixed channels.
    pub fn color(&self) -> Option<Color> {
        match self.kind {
            TokenKind::Color => Color::parse(&self.value).ok().flatten(),
            _ => None,
        }
    }
}

/// Immutable, validated set of tokens in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    tokens: Vec<ThemeToken>,
    index: HashMap<String, usize>,
}

impl TokenTable {
    /// Builds a table from `(name, literal)` pairs.
    ///
    /// Names may carry the `--` prefix. Fails on duplicates, empty values and
    /// values that reference other tokens.
    pub fn from_entries<I, N, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = TokenTable::default();

        for (name, value) in entries {
            let name = normalize_name(name.as_ref());
            let value = value.as_ref().trim();

            if name.is_empty() {
                return Err(ThemeError::InvalidToken {
                    token: name,
                    message: "token name is empty".to_string(),
                });
            }
            if table.index.contains_key(&name) {
                return Err(ThemeError::DuplicateToken { token: name });
            }

            let parsed = PropertyValue::parse(value).map_err(|message| {
                ThemeError::InvalidToken {
                    token: name.clone(),
                    message,
                }
            })?;
            if let Some(reference) = parsed.token_refs().next() {
                return Err(ThemeError::ChainedToken {
                    token: name,
                    reference: reference.to_string(),
                });
            }

            table.index.insert(name.clone(), table.tokens.len());
            table.tokens.push(ThemeToken {
                kind: TokenKind::classify(value),
                value: value.to_string(),
                name,
            });
        }

        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeToken> {
        self.index
            .get(normalize_name(name).as_str())
            .map(|&i| &self.tokens[i])
    }

    /// The literal a reference to `name` resolves to.
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.get(name).map(|t| t.value())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Tokens in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &ThemeToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix("--").unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_keeps_order_and_literals() {
        let table = TokenTable::from_entries([
            ("--primary-color", "#4CAF50"),
            ("radius", "8px"),
            ("card-shadow", "0 2px 4px rgba(0, 0, 0, 0.3)"),
        ])
        .unwrap();

        let names: Vec<_> = table.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["primary-color", "radius", "card-shadow"]);
        assert_eq!(table.literal("primary-color"), Some("#4CAF50"));
        assert_eq!(table.literal("--primary-color"), Some("#4CAF50"));
    }

    #[test]
    fn test_token_kinds() {
        let table = TokenTable::from_entries([
            ("a", "#4CAF50"),
            ("b", "0.3s"),
            ("c", "0"),
            ("d", "'Inter', sans-serif"),
            ("e", "1px solid #333"),
        ])
        .unwrap();
        assert_eq!(table.get("a").unwrap().kind(), TokenKind::Color);
        assert_eq!(table.get("b").unwrap().kind(), TokenKind::Dimension);
        assert_eq!(table.get("c").unwrap().kind(), TokenKind::Dimension);
        assert_eq!(table.get("d").unwrap().kind(), TokenKind::Other);
        assert_eq!(table.get("e").unwrap().kind(), TokenKind::Other);
    }

    #[test]
    fn test_extended_colors_classified_as_color() {
        let table = TokenTable::from_entries([
            ("a", "darkgray"),
            ("b", "whitesmoke"),
            ("c", "hsl(120, 50%, 50%)"),
            ("d", "rgb(100%, 0%, 0%)"),
            ("e", "oklch(70% 0.1 150)"),
        ])
        .unwrap();
        for token in table.iter() {
            assert_eq!(token.kind(), TokenKind::Color, "{}", token.value());
        }
        assert_eq!(table.get("c").unwrap().color(), Some(Color::rgb(64, 191, 64)));
        assert_eq!(table.get("e").unwrap().color(), None);
    }

    #[test]
    fn test_token_value_cannot_end_declaration() {
        let err = TokenTable::from_entries([("a", "red; color: blue")]).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidToken { .. }));
    }

    #[test]
    fn test_color_accessor() {
        let table = TokenTable::from_entries([("bg", "#000"), ("gap", "4px")]).unwrap();
        assert_eq!(table.get("bg").unwrap().color(), Some(Color::rgb(0, 0, 0)));
        assert_eq!(table.get("gap").unwrap().color(), None);
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let err = TokenTable::from_entries([("a", "#fff"), ("--a", "#000")]).unwrap_err();
        assert!(matches!(err, ThemeError::DuplicateToken { token } if token == "a"));
    }

    #[test]
    fn test_chained_token_rejected() {
        let err = TokenTable::from_entries([("a", "#fff"), ("b", "var(--a)")]).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::ChainedToken { ref token, ref reference } if token == "b" && reference == "a"
        ));
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = TokenTable::from_entries([("a", "  ")]).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidToken { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(TokenTable::from_entries([("--", "#fff")]).is_err());
    }
}
