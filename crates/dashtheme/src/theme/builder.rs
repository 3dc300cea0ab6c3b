//! Theme construction and load-time validation.

use std::str::FromStr;

use super::theme::Theme;
use crate::error::{Result, ThemeError};
use crate::style::{Color, Declaration, Property, PropertyValue, Selector, StyleRule, ValueKind};
use crate::token::{TokenKind, TokenTable};

#[derive(Debug, Clone)]
struct RuleSource {
    selector: String,
    declarations: Vec<(String, String)>,
}

/// Collects tokens and rules, then validates them into a [`Theme`].
///
/// The CSS and YAML loaders produce a builder; it can also be used directly:
///
/// ```rust
/// use dashtheme::{InteractionState, Property, Theme, WidgetCategory};
///
/// let theme = Theme::builder("brand")
///     .token("primary-color", "#4CAF50")
///     .rule("button", [("background-color", "var(--primary-color)"), ("color", "white")])
///     .build()
///     .unwrap();
///
/// let style = theme.resolve(WidgetCategory::Button, InteractionState::Default);
/// assert_eq!(style.get(Property::BackgroundColor), Some("#4CAF50"));
/// ```
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    name: String,
    tokens: Vec<(String, String)>,
    rules: Vec<RuleSource>,
}

impl ThemeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        ThemeBuilder {
            name: name.into(),
            tokens: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Adds a token. The name may include the `--` prefix.
    pub fn token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_token(name, value);
        self
    }

    /// Appends a rule. Later rules win over earlier ones of equal specificity.
    pub fn rule<I, K, V>(mut self, selector: impl Into<String>, declarations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let declarations = declarations
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.push_rule(selector, declarations);
        self
    }

    pub(crate) fn push_token(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.push((name.into(), value.into()));
    }

    pub(crate) fn push_rule(&mut self, selector: impl Into<String>, declarations: Vec<(String, String)>) {
        self.rules.push(RuleSource {
            selector: selector.into(),
            declarations,
        });
    }

    /// Validates the collected document and produces an immutable theme.
    ///
    /// # Errors
    ///
    /// Fails on the first problem found, in this order per item: duplicate,
    /// chained or empty tokens; then for each rule an invalid selector,
    /// unknown property, malformed value, undefined token reference, or a
    /// non-color value in a color property.
    pub fn build(self) -> Result<Theme> {
        let tokens = TokenTable::from_entries(self.tokens)?;

        let mut rules = Vec::with_capacity(self.rules.len());
        for source in self.rules {
            rules.push(build_rule(source, &tokens)?);
        }

        log::debug!(
            "built theme '{}' with {} tokens and {} rules",
            self.name,
            tokens.len(),
            rules.len()
        );

        Ok(Theme::from_parts(self.name, tokens, rules))
    }
}

fn build_rule(source: RuleSource, tokens: &TokenTable) -> Result<StyleRule> {
    let selector_text = source.selector.trim().to_string();
    let selectors =
        Selector::parse_list(&selector_text).map_err(|message| ThemeError::InvalidSelector {
            selector: selector_text.clone(),
            message,
        })?;

    let mut declarations = Vec::with_capacity(source.declarations.len());
    for (name, raw) in source.declarations {
        let property = Property::from_str(name.trim()).map_err(|_| ThemeError::UnknownProperty {
            property: name.clone(),
            selector: selector_text.clone(),
        })?;

        let value = PropertyValue::parse(&raw).map_err(|message| ThemeError::InvalidValue {
            selector: selector_text.clone(),
            property: property.to_string(),
            value: raw.clone(),
            message,
        })?;

        let literal = value
            .resolve(|token| tokens.literal(token))
            .map_err(|token| ThemeError::UndefinedToken {
                token,
                selector: selector_text.clone(),
                property: property.to_string(),
            })?;

        if property.value_kind() == ValueKind::Color {
            check_color(&selector_text, property, &value, &literal, tokens)?;
        }

        declarations.push(Declaration {
            property,
            value,
            literal,
        });
    }

    Ok(StyleRule {
        selector_text,
        selectors,
        declarations,
    })
}

fn check_color(
    selector: &str,
    property: Property,
    value: &PropertyValue,
    literal: &str,
    tokens: &TokenTable,
) -> Result<()> {
    if let Some(name) = value.sole_token() {
        return match tokens.get(name) {
            Some(token) if token.kind() != TokenKind::Color => Err(ThemeError::TokenTypeMismatch {
                selector: selector.to_string(),
                property: property.to_string(),
                token: name.to_string(),
                value: token.value().to_string(),
            }),
            _ => Ok(()),
        };
    }

    Color::parse(literal).map_err(|message| ThemeError::InvalidValue {
        selector: selector.to_string(),
        property: property.to_string(),
        value: value.raw().to_string(),
        message,
    })?;
    Ok(())
}
