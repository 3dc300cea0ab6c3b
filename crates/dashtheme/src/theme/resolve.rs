//! Cascade resolution.
//!
//! Resolution is a pure function of the theme and a `(category, state)` pair.
//! Matching rules are ordered by [`Specificity`] and then by source position,
//! and applied in that order, so the last writer of each property wins. Base
//! rules always sort before state rules, which gives state overrides their
//! isolation: a property the override does not mention keeps its base value.
//!
//! Token references were already replaced by their literals when the theme was
//! built, so nothing here can fail.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::theme::Theme;
use crate::style::{Property, Specificity};
use crate::widget::{InteractionState, WidgetCategory};

/// The concrete properties for one widget category in one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    properties: BTreeMap<Property, String>,
}

impl ResolvedStyle {
    pub fn get(&self, property: Property) -> Option<&str> {
        self.properties.get(&property).map(String::as_str)
    }

    /// Properties in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &str)> {
        self.properties.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Formats the properties as CSS declarations (`color: white;`), one per line.
    pub fn to_declarations(&self) -> String {
        let mut out = String::new();
        for (property, value) in self.iter() {
            out.push_str(property.css_name());
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out
    }
}

impl Serialize for ResolvedStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (property, value) in &self.properties {
            map.serialize_entry(property.css_name(), value)?;
        }
        map.end()
    }
}

/// Every category in every state, resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTheme {
    name: String,
    styles: BTreeMap<(WidgetCategory, InteractionState), ResolvedStyle>,
}

impl ResolvedTheme {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, category: WidgetCategory, state: InteractionState) -> Option<&ResolvedStyle> {
        self.styles.get(&(category, state))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetCategory, InteractionState, &ResolvedStyle)> {
        self.styles.iter().map(|((c, s), style)| (*c, *s, style))
    }

    /// The resolved theme as a JSON object: `{ "button": { "hover": { ... } } }`.
    ///
    /// Empty styles are omitted.
    pub fn to_json(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for (category, state, style) in self.iter() {
            if style.is_empty() {
                continue;
            }
            let properties: serde_json::Map<String, serde_json::Value> = style
                .iter()
                .map(|(p, v)| (p.css_name().to_string(), serde_json::Value::from(v)))
                .collect();
            let states = root
                .entry(category.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if let serde_json::Value::Object(states) = states {
                states.insert(
                    state.name().to_string(),
                    serde_json::Value::Object(properties),
                );
            }
        }
        serde_json::Value::Object(root)
    }
}

impl Theme {
    /// Resolves the properties for `category` in `state`.
    ///
    /// Unspecified properties are simply absent; nothing is inherited from
    /// other categories.
    pub fn resolve(&self, category: WidgetCategory, state: InteractionState) -> ResolvedStyle {
        let mut matching: Vec<(Specificity, usize)> = self
            .rules()
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                rule.specificity_for(category, state)
                    .map(|specificity| (specificity, index))
            })
            .collect();
        matching.sort();

        let mut properties = BTreeMap::new();
        for (_, index) in matching {
            for declaration in self.rules()[index].declarations() {
                properties.insert(declaration.property(), declaration.literal().to_string());
            }
        }
        ResolvedStyle { properties }
    }

    /// Resolves every category in every interaction state.
    pub fn resolve_all(&self) -> ResolvedTheme {
        let mut styles = BTreeMap::new();
        for category in WidgetCategory::ALL {
            for state in InteractionState::ALL {
                styles.insert((category, state), self.resolve(category, state));
            }
        }
        ResolvedTheme {
            name: self.name().to_string(),
            styles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{AlertKind, HeadingLevel};

    fn theme() -> Theme {
        Theme::from_css(
            "t",
            r#"
            :root {
                --primary-color: #4CAF50;
                --button-hover-color: #388E3C;
                --error-bg: #3E2723;
                --info-bg: #0D47A1;
            }
            button { background-color: var(--primary-color); color: white; border-radius: 8px; }
            button:hover { background-color: var(--button-hover-color); }
            alert { border-left-width: 5px; border-left-style: solid; }
            alert.error { background-color: var(--error-bg); }
            alert.info { background-color: var(--info-bg); }
            heading { font-weight: 600; }
            heading.h1 { font-size: 2rem; }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_base() {
        let style = theme().resolve(WidgetCategory::Button, InteractionState::Default);
        assert_eq!(style.get(Property::BackgroundColor), Some("#4CAF50"));
        assert_eq!(style.get(Property::Color), Some("white"));
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn test_resolve_state_override() {
        let style = theme().resolve(WidgetCategory::Button, InteractionState::Hover);
        assert_eq!(style.get(Property::BackgroundColor), Some("#388E3C"));
        assert_eq!(style.get(Property::Color), Some("white"));
        assert_eq!(style.get(Property::BorderRadius), Some("8px"));
    }

    #[test]
    fn test_state_without_override_equals_base() {
        let t = theme();
        assert_eq!(
            t.resolve(WidgetCategory::Button, InteractionState::Focus),
            t.resolve(WidgetCategory::Button, InteractionState::Default)
        );
    }

    #[test]
    fn test_variant_rule_applies_only_to_variant() {
        let t = theme();
        let error = t.resolve(WidgetCategory::Alert(AlertKind::Error), InteractionState::Default);
        let warning = t.resolve(
            WidgetCategory::Alert(AlertKind::Warning),
            InteractionState::Default,
        );
        assert_eq!(error.get(Property::BackgroundColor), Some("#3E2723"));
        assert_eq!(error.get(Property::BorderLeftStyle), Some("solid"));
        assert_eq!(warning.get(Property::BackgroundColor), None);
        assert_eq!(warning.get(Property::BorderLeftWidth), Some("5px"));
    }

    #[test]
    fn test_variant_beats_family_regardless_of_order() {
        let t = Theme::from_css(
            "t",
            "heading.h2 { font-size: 1.5rem; } heading { font-size: 1rem; }",
        )
        .unwrap();
        let h2 = t.resolve(WidgetCategory::Heading(HeadingLevel::H2), InteractionState::Default);
        let h3 = t.resolve(WidgetCategory::Heading(HeadingLevel::H3), InteractionState::Default);
        assert_eq!(h2.get(Property::FontSize), Some("1.5rem"));
        assert_eq!(h3.get(Property::FontSize), Some("1rem"));
    }

    #[test]
    fn test_later_rule_wins_at_equal_specificity() {
        let t = Theme::from_css("t", "divider { opacity: 0.5; } divider { opacity: 0.8; }").unwrap();
        let style = t.resolve(WidgetCategory::Divider, InteractionState::Default);
        assert_eq!(style.get(Property::Opacity), Some("0.8"));
    }

    #[test]
    fn test_state_rule_beats_later_base_rule() {
        let t = Theme::from_css(
            "t",
            "button:hover { opacity: 0.9; } button { opacity: 1; }",
        )
        .unwrap();
        let style = t.resolve(WidgetCategory::Button, InteractionState::Hover);
        assert_eq!(style.get(Property::Opacity), Some("0.9"));
    }

    #[test]
    fn test_unstyled_category_is_empty() {
        let style = theme().resolve(WidgetCategory::Metric, InteractionState::Default);
        assert!(style.is_empty());
    }

    #[test]
    fn test_to_declarations() {
        let style = theme().resolve(WidgetCategory::Button, InteractionState::Hover);
        assert_eq!(
            style.to_declarations(),
            "color: white;\nbackground-color: #388E3C;\nborder-radius: 8px;\n"
        );
    }

    #[test]
    fn test_resolve_all_covers_every_pair() {
        let resolved = theme().resolve_all();
        assert_eq!(
            resolved.iter().count(),
            WidgetCategory::ALL.len() * InteractionState::ALL.len()
        );
        assert_eq!(resolved.name(), "t");
        let hover = resolved
            .get(WidgetCategory::Button, InteractionState::Hover)
            .unwrap();
        assert_eq!(hover.get(Property::BackgroundColor), Some("#388E3C"));
    }

    #[test]
    fn test_to_json() {
        let json = theme().resolve_all().to_json();
        assert_eq!(json["button"]["hover"]["background-color"], "#388E3C");
        assert_eq!(json["alert.error"]["default"]["background-color"], "#3E2723");
        assert!(json.get("metric").is_none());
    }

    #[test]
    fn test_resolved_style_serializes_with_css_names() {
        let style = theme().resolve(WidgetCategory::Button, InteractionState::Default);
        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(value["background-color"], "#4CAF50");
        assert_eq!(value["border-radius"], "8px");
    }
}
