//! CSS emission for the host page.
//!
//! Two forms are produced:
//!
//! - [`Theme::to_css`] keeps the token layer: a `:root` block of custom
//!   properties and every rule rewritten onto framework selectors, with
//!   `var(--token)` references intact. Browser devtools then show token names.
//!   Blocks follow the cascade order of [`Theme::resolve`], so a family rule
//!   written after a variant rule still lands before it.
//! - [`ResolvedTheme::to_css`] is fully flattened: one block per category and
//!   state with literal values, state blocks holding only what the state
//!   changes.
//!
//! Either output is wrapped by [`style_block`] for injection into the page.
//!
//! Every rule must land somewhere: a category without a binding is a
//! [`ThemeError::UnboundCategory`], never silently skipped.

use crate::bindings::WidgetBindings;
use crate::error::{Result, ThemeError};
use crate::style::{Property, Selector, Specificity};
use crate::theme::{ResolvedTheme, Theme};
use crate::widget::{InteractionState, WidgetCategory};

const INDENT: &str = "    ";

impl Theme {
    /// Emits the theme as CSS targeting the bound framework selectors.
    pub fn to_css(&self, bindings: &WidgetBindings) -> Result<String> {
        let mut out = String::new();

        if !self.tokens().is_empty() {
            let tokens = self
                .tokens()
                .iter()
                .map(|t| (format!("--{}", t.name()), t.value().to_string()));
            write_block(&mut out, &[":root".to_string()], tokens);
        }

        for (_, index, group) in self.cascade_groups() {
            let rule = &self.rules()[index];
            let mut selectors = Vec::new();
            for selector in group {
                for category in selector.categories() {
                    for page in bindings.page_selectors(category, selector.state())? {
                        if !selectors.contains(&page) {
                            selectors.push(page);
                        }
                    }
                }
            }
            let declarations = rule
                .declarations()
                .iter()
                .map(|d| (d.property().css_name().to_string(), d.value().raw().to_string()));
            write_block(&mut out, &selectors, declarations);
        }

        log::debug!("emitted {} bytes of CSS for theme '{}'", out.len(), self.name());
        Ok(out)
    }

    /// Selectors of every non-empty rule, grouped by specificity and sorted
    /// into the order the resolver applies them.
    fn cascade_groups(&self) -> Vec<(Specificity, usize, Vec<&Selector>)> {
        let mut groups: Vec<(Specificity, usize, Vec<&Selector>)> = Vec::new();
        for (index, rule) in self.rules().iter().enumerate() {
            if rule.declarations().is_empty() {
                continue;
            }
            for selector in rule.selectors() {
                let specificity = selector.specificity();
                match groups
                    .iter_mut()
                    .find(|(s, i, _)| *s == specificity && *i == index)
                {
                    Some((_, _, group)) => group.push(selector),
                    None => groups.push((specificity, index, vec![selector])),
                }
            }
        }
        groups.sort_by_key(|(specificity, index, _)| (*specificity, *index));
        groups
    }
}

impl ResolvedTheme {
    /// Emits the resolved styles as flat CSS with literal values.
    pub fn to_css(&self, bindings: &WidgetBindings) -> Result<String> {
        let mut out = String::new();

        for category in WidgetCategory::ALL {
            let Some(base) = self.get(category, InteractionState::Default) else {
                continue;
            };
            emit_resolved(&mut out, bindings, category, InteractionState::Default, base.iter())?;

            for state in InteractionState::ALL.into_iter().filter(|s| !s.is_default()) {
                let Some(style) = self.get(category, state) else {
                    continue;
                };
                let changed = style.iter().filter(|(p, v)| base.get(*p) != Some(*v));
                emit_resolved(&mut out, bindings, category, state, changed)?;
            }
        }

        Ok(out)
    }
}

fn emit_resolved<'a>(
    out: &mut String,
    bindings: &WidgetBindings,
    category: WidgetCategory,
    state: InteractionState,
    properties: impl Iterator<Item = (Property, &'a str)>,
) -> Result<()> {
    let declarations: Vec<(String, String)> = properties
        .map(|(p, v)| (p.css_name().to_string(), v.to_string()))
        .collect();
    if declarations.is_empty() {
        return Ok(());
    }
    let selectors = bindings.page_selectors(category, state)?;
    write_block(out, &selectors, declarations);
    Ok(())
}

fn write_block(
    out: &mut String,
    selectors: &[String],
    declarations: impl IntoIterator<Item = (String, String)>,
) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&selectors.join(",\n"));
    out.push_str(" {\n");
    for (name, value) in declarations {
        out.push_str(INDENT);
        out.push_str(&name);
        out.push_str(": ");
        out.push_str(&value);
        out.push_str(";\n");
    }
    out.push_str("}\n");
}

/// Wraps CSS in a `<style>` element for injection into the page head.
///
/// Every `</` in the CSS is written as `\3c /`, so a value such as a quoted
/// font name can never close the element early.
pub fn style_block(css: &str) -> String {
    let css = css.replace("</", "\\3c /");
    let mut out = String::with_capacity(css.len() + 17);
    out.push_str("<style>\n");
    out.push_str(&css);
    if !css.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</style>");
    out
}

/// Reports whether every category styled by `theme` has a binding.
///
/// Returns the first unbound category as an error, so a theme can be checked
/// against a set of bindings before anything is emitted. Rules without
/// declarations emit nothing and need no binding.
pub fn check_bindings(theme: &Theme, bindings: &WidgetBindings) -> Result<()> {
    for rule in theme.rules().iter().filter(|r| !r.declarations().is_empty()) {
        for selector in rule.selectors() {
            for category in selector.categories() {
                if !bindings.is_bound(category) {
                    return Err(ThemeError::UnboundCategory { category });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{AlertKind, HeadingLevel};

    fn theme() -> Theme {
        Theme::from_css(
            "t",
            r#"
            :root { --primary-color: #4CAF50; --button-hover-color: #388E3C; }
            button { background-color: var(--primary-color); color: white; }
            button:hover { background-color: var(--button-hover-color); }
            "#,
        )
        .unwrap()
    }

    fn bindings() -> WidgetBindings {
        WidgetBindings::new().bind(WidgetCategory::Button, ".stButton > button")
    }

    #[test]
    fn test_theme_to_css() {
        let css = theme().to_css(&bindings()).unwrap();
        let expected = "\
:root {
    --primary-color: #4CAF50;
    --button-hover-color: #388E3C;
}

.stButton > button {
    background-color: var(--primary-color);
    color: white;
}

.stButton > button:hover {
    background-color: var(--button-hover-color);
}
";
        assert_eq!(css, expected);
    }

    #[test]
    fn test_family_rule_expands_to_every_variant() {
        let theme = Theme::from_css("t", "alert { border-left-style: solid; }").unwrap();
        let bindings = WidgetBindings::new()
            .bind(WidgetCategory::Alert(AlertKind::Info), ".info")
            .bind(WidgetCategory::Alert(AlertKind::Warning), ".warning")
            .bind(WidgetCategory::Alert(AlertKind::Error), ".error");
        let css = theme.to_css(&bindings).unwrap();
        assert!(css.starts_with(".info,\n.warning,\n.error {\n"), "{}", css);
    }

    #[test]
    fn test_emission_order_follows_specificity() {
        let theme = Theme::from_css(
            "t",
            "heading.h2 { font-size: 1.5rem; } heading { font-size: 1rem; }",
        )
        .unwrap();
        let mut bindings = WidgetBindings::new();
        for level in HeadingLevel::ALL {
            bindings = bindings.bind(WidgetCategory::Heading(level), level.name());
        }

        let css = theme.to_css(&bindings).unwrap();
        let expected = "\
h1,
h2,
h3,
h4 {
    font-size: 1rem;
}

h2 {
    font-size: 1.5rem;
}
";
        assert_eq!(css, expected);

        let h2 = WidgetCategory::Heading(HeadingLevel::H2);
        let resolved = theme.resolve(h2, InteractionState::Default);
        assert_eq!(resolved.get(Property::FontSize), Some("1.5rem"));
    }

    #[test]
    fn test_state_rule_emitted_after_later_base_rule() {
        let theme = Theme::from_css(
            "t",
            "button:hover { color: red; } button { color: white; }",
        )
        .unwrap();
        let css = theme.to_css(&bindings()).unwrap();
        let base = css.find(".stButton > button {").unwrap();
        let hover = css.find(".stButton > button:hover {").unwrap();
        assert!(base < hover, "{}", css);
    }

    #[test]
    fn test_mixed_selector_list_split_by_specificity() {
        let theme = Theme::from_css(
            "t",
            "alert.error, divider { color: red; } alert { color: blue; }",
        )
        .unwrap();
        let bindings = WidgetBindings::new()
            .bind(WidgetCategory::Alert(AlertKind::Info), ".info")
            .bind(WidgetCategory::Alert(AlertKind::Warning), ".warning")
            .bind(WidgetCategory::Alert(AlertKind::Error), ".error")
            .bind(WidgetCategory::Divider, "hr");
        let css = theme.to_css(&bindings).unwrap();
        let expected = "\
hr {
    color: red;
}

.info,
.warning,
.error {
    color: blue;
}

.error {
    color: red;
}
";
        assert_eq!(css, expected);
    }

    #[test]
    fn test_unbound_category_is_error() {
        let theme = Theme::from_css("t", "metric { color: white; }").unwrap();
        let err = theme.to_css(&bindings()).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::UnboundCategory {
                category: WidgetCategory::Metric
            }
        ));
        assert!(check_bindings(&theme, &bindings()).is_err());
    }

    #[test]
    fn test_resolved_to_css_emits_state_changes_only() {
        let css = theme().resolve_all().to_css(&bindings()).unwrap();
        let expected = "\
.stButton > button {
    color: white;
    background-color: #4CAF50;
}

.stButton > button:hover {
    background-color: #388E3C;
}
";
        assert_eq!(css, expected);
    }

    #[test]
    fn test_style_block() {
        assert_eq!(style_block("a {}\n"), "<style>\na {}\n</style>");
        assert_eq!(style_block("a {}"), "<style>\na {}\n</style>");
    }

    #[test]
    fn test_style_block_cannot_be_closed_by_content() {
        let theme = Theme::from_css(
            "t",
            r#"button { font-family: "</style><script>alert(1)</script>"; }"#,
        )
        .unwrap();
        let html = style_block(&theme.to_css(&bindings()).unwrap());

        assert_eq!(html.matches("</").count(), 1, "{}", html);
        assert!(html.ends_with("</style>"));
        assert!(html.contains(r#"font-family: "\3c /style><script>alert(1)\3c /script>";"#));
    }

    #[test]
    fn test_check_bindings_with_defaults() {
        let theme = theme();
        assert!(check_bindings(&theme, &WidgetBindings::dashboard_defaults()).is_ok());
    }

    #[test]
    fn test_check_bindings_ignores_empty_rules() {
        let theme = Theme::from_css("t", "button { color: white; } metric { }").unwrap();
        assert!(check_bindings(&theme, &bindings()).is_ok());
        assert!(theme.to_css(&bindings()).is_ok());
    }
}
