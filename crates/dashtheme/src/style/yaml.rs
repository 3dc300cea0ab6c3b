//! YAML theme documents.
//!
//! The YAML form carries the same information as the CSS form, for themes
//! generated by tools or kept next to other YAML configuration:
//!
//! ```yaml
//! tokens:
//!   primary-color: "#4CAF50"
//!   button-hover-color: "#388E3C"
//!
//! rules:
//!   - selector: button
//!     declarations:
//!       background-color: var(--primary-color)
//!       color: white
//!   - selector: button:hover
//!     declarations:
//!       background-color: var(--button-hover-color)
//! ```
//!
//! Rules keep their list order, which is the cascade's source order. Numeric
//! values (`font-weight: 600`) are accepted and kept as written.

use serde::Deserialize;

use crate::error::{Result, ThemeError};
use crate::theme::ThemeBuilder;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlTheme {
    #[serde(default)]
    tokens: serde_yaml::Mapping,
    #[serde(default)]
    rules: Vec<YamlRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlRule {
    selector: String,
    #[serde(default)]
    declarations: serde_yaml::Mapping,
}

/// Parses a YAML theme document into an unvalidated builder.
pub fn parse_yaml(name: &str, yaml: &str) -> Result<ThemeBuilder> {
    let document: YamlTheme =
        serde_yaml::from_str(yaml).map_err(|e| ThemeError::InvalidDocument {
            path: None,
            message: e.to_string(),
        })?;

    let mut builder = ThemeBuilder::new(name);

    for (key, value) in &document.tokens {
        let token = scalar_key(key, "token")?;
        let literal = scalar_value(value).ok_or_else(|| ThemeError::InvalidToken {
            token: token.clone(),
            message: format!("expected a string or number, got {:?}", value),
        })?;
        builder.push_token(token, literal);
    }

    for rule in document.rules {
        let mut declarations = Vec::with_capacity(rule.declarations.len());
        for (key, value) in &rule.declarations {
            let property = scalar_key(key, "property")?;
            let literal = scalar_value(value).ok_or_else(|| ThemeError::InvalidValue {
                selector: rule.selector.clone(),
                property: property.clone(),
                value: format!("{:?}", value),
                message: "expected a string or number".to_string(),
            })?;
            declarations.push((property, literal));
        }
        builder.push_rule(rule.selector, declarations);
    }

    Ok(builder)
}

fn scalar_key(key: &serde_yaml::Value, what: &str) -> Result<String> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| ThemeError::InvalidDocument {
            path: None,
            message: format!("{} name must be a string, got {:?}", what, key),
        })
}

fn scalar_value(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Property;
    use crate::widget::{InteractionState, WidgetCategory};

    #[test]
    fn test_parse_yaml_theme() {
        let yaml = r##"
tokens:
  primary-color: "#4CAF50"
  weight: 600
rules:
  - selector: button
    declarations:
      background-color: var(--primary-color)
      font-weight: var(--weight)
  - selector: button:hover
    declarations:
      opacity: 0.9
"##;
        let theme = parse_yaml("yaml", yaml).unwrap().build().unwrap();
        let hover = theme.resolve(WidgetCategory::Button, InteractionState::Hover);
        assert_eq!(hover.get(Property::BackgroundColor), Some("#4CAF50"));
        assert_eq!(hover.get(Property::FontWeight), Some("600"));
        assert_eq!(hover.get(Property::Opacity), Some("0.9"));
    }

    #[test]
    fn test_parse_empty_document() {
        let theme = parse_yaml("empty", "{}").unwrap().build().unwrap();
        assert!(theme.tokens().is_empty());
        assert!(theme.rules().is_empty());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let err = parse_yaml("bad", "palette: {}").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidDocument { .. }));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = parse_yaml("bad", "tokens: [unclosed").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidDocument { .. }));
    }

    #[test]
    fn test_non_scalar_token_rejected() {
        let err = parse_yaml("bad", "tokens:\n  a: [1, 2]").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidToken { .. }));
    }

    #[test]
    fn test_rule_order_preserved() {
        let yaml = r##"
tokens:
  a: "#111111"
  b: "#222222"
rules:
  - selector: divider
    declarations:
      border-color: var(--a)
  - selector: divider
    declarations:
      border-color: var(--b)
"##;
        let theme = parse_yaml("order", yaml).unwrap().build().unwrap();
        let style = theme.resolve(WidgetCategory::Divider, InteractionState::Default);
        assert_eq!(style.get(Property::BorderColor), Some("#222222"));
    }

    #[test]
    fn test_value_with_declaration_break_rejected() {
        let yaml = r##"
rules:
  - selector: button
    declarations:
      padding: "1rem; display: none"
"##;
        let err = parse_yaml("inject", yaml).unwrap().build().unwrap_err();
        match err {
            ThemeError::InvalidValue {
                selector, property, ..
            } => {
                assert_eq!(selector, "button");
                assert_eq!(property, "padding");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
