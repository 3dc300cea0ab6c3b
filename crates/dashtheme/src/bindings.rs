//! Widget bindings: how logical widget categories map to page selectors.
//!
//! Themes name widgets logically (`button`, `alert.error`). The selectors that
//! actually find those widgets in the page belong to the UI framework, change
//! between framework releases, and are often generated. They are therefore
//! supplied from outside as a [`WidgetBindings`] value instead of being baked
//! into themes.
//!
//! Bindings can be built in code, loaded from YAML, or taken from
//! [`WidgetBindings::dashboard_defaults`]:
//!
//! ```yaml
//! widgets:
//!   button: ".stButton > button"
//!   alert.error:
//!     - '[data-testid="stAlertContentError"]'
//!     - '.stAlert .error'
//! states:
//!   selected: '[aria-selected="true"]'
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, ThemeError};
use crate::widget::{AlertKind, HeadingLevel, InteractionState, WidgetCategory};

/// Category-to-selector bindings plus per-state selector suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBindings {
    selectors: BTreeMap<WidgetCategory, Vec<String>>,
    states: BTreeMap<InteractionState, String>,
}

impl Default for WidgetBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBindings {
    /// No category bound; standard state suffixes.
    pub fn new() -> Self {
        let states = [
            (InteractionState::Hover, ":hover"),
            (InteractionState::Focus, ":focus"),
            (InteractionState::Active, ":active"),
            (InteractionState::Selected, "[aria-selected=\"true\"]"),
        ]
        .into_iter()
        .map(|(state, suffix)| (state, suffix.to_string()))
        .collect();

        WidgetBindings {
            selectors: BTreeMap::new(),
            states,
        }
    }

    /// Adds a selector for `category`. A category may have several.
    pub fn bind(mut self, category: WidgetCategory, selector: impl Into<String>) -> Self {
        let selector = selector.into();
        let entry = self.selectors.entry(category).or_default();
        if !entry.contains(&selector) {
            entry.push(selector);
        }
        self
    }

    /// Replaces the suffix appended to selectors for `state`.
    ///
    /// The default state has no suffix and cannot be rebound.
    pub fn bind_state(mut self, state: InteractionState, suffix: impl Into<String>) -> Self {
        if !state.is_default() {
            self.states.insert(state, suffix.into());
        }
        self
    }

    /// Selectors bound to `category`; empty if unbound.
    pub fn selectors_for(&self, category: WidgetCategory) -> &[String] {
        self.selectors
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_bound(&self, category: WidgetCategory) -> bool {
        !self.selectors_for(category).is_empty()
    }

    /// Suffix for `state`, empty for the default state.
    pub fn state_suffix(&self, state: InteractionState) -> &str {
        self.states.get(&state).map(String::as_str).unwrap_or("")
    }

    /// Page selectors for `category` in `state`.
    pub fn page_selectors(
        &self,
        category: WidgetCategory,
        state: InteractionState,
    ) -> Result<Vec<String>> {
        let selectors = self.selectors_for(category);
        if selectors.is_empty() {
            return Err(ThemeError::UnboundCategory { category });
        }
        let suffix = self.state_suffix(state);
        Ok(selectors
            .iter()
            .map(|s| format!("{}{}", s, suffix))
            .collect())
    }

    /// Loads bindings from YAML on top of the standard state suffixes.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: BindingsDocument =
            serde_yaml::from_str(yaml).map_err(|e| invalid(e.to_string()))?;

        let mut bindings = WidgetBindings::new();
        for (key, selectors) in document.widgets {
            let category = WidgetCategory::from_str(&key).map_err(invalid)?;
            for selector in selectors.into_vec() {
                bindings = bindings.bind(category, selector);
            }
        }
        for (key, suffix) in document.states {
            let state = InteractionState::from_str(&key).map_err(invalid)?;
            if state.is_default() {
                return Err(invalid("the default state has no selector suffix".to_string()));
            }
            bindings = bindings.bind_state(state, suffix);
        }
        Ok(bindings)
    }

    /// Selectors for the dashboard framework's current widget markup.
    ///
    /// These track the framework's `data-testid` attributes and class names,
    /// which the framework may change in any release.
    pub fn dashboard_defaults() -> Self {
        let mut bindings = WidgetBindings::new()
            .bind(WidgetCategory::Sidebar, "[data-testid=\"stSidebar\"]")
            .bind(WidgetCategory::Button, ".stButton > button")
            .bind(WidgetCategory::Button, ".stFormSubmitButton > button")
            .bind(WidgetCategory::Radio, ".stRadio label")
            .bind(WidgetCategory::TextInput, ".stTextInput input")
            .bind(WidgetCategory::NumberInput, ".stNumberInput input")
            .bind(
                WidgetCategory::Select,
                ".stSelectbox div[data-baseweb=\"select\"] > div",
            )
            .bind(
                WidgetCategory::FileUploader,
                "[data-testid=\"stFileUploaderDropzone\"]",
            )
            .bind(WidgetCategory::Expander, "[data-testid=\"stExpander\"] details")
            .bind(WidgetCategory::Metric, "[data-testid=\"stMetric\"]")
            .bind(WidgetCategory::DataFrame, "[data-testid=\"stDataFrame\"]")
            .bind(WidgetCategory::TabList, ".stTabs [data-baseweb=\"tab\"]")
            .bind(WidgetCategory::TabPanel, ".stTabs [data-baseweb=\"tab-panel\"]")
            .bind(WidgetCategory::Divider, "hr");

        for level in HeadingLevel::ALL {
            bindings = bindings.bind(WidgetCategory::Heading(level), level.name());
        }
        for kind in AlertKind::ALL {
            let testid = match kind {
                AlertKind::Info => "stAlertContentInfo",
                AlertKind::Warning => "stAlertContentWarning",
                AlertKind::Error => "stAlertContentError",
            };
            bindings = bindings.bind(
                WidgetCategory::Alert(kind),
                format!("[data-testid=\"{}\"]", testid),
            );
        }
        bindings
    }
}

fn invalid(message: String) -> ThemeError {
    ThemeError::InvalidDocument {
        path: None,
        message,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingsDocument {
    #[serde(default)]
    widgets: BTreeMap<String, OneOrMany>,
    #[serde(default)]
    states: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}
