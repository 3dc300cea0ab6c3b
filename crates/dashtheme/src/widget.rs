//! Widget categories and interaction states a theme can target.
//!
//! The set of widgets is fixed by the host framework. Categories are grouped
//! into families so a rule can target every alert or every heading at once,
//! while `alert.error` or `heading.h2` narrows it to one category.
//!
//! | Family | Categories |
//! |--------|------------|
//! | `heading` | `heading.h1` … `heading.h4` |
//! | `alert` | `alert.info`, `alert.warning`, `alert.error` |
//! | everything else | the family itself (`button`, `metric`, …) |

use std::fmt;
use std::str::FromStr;

/// A group of widget categories addressed by one selector name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetFamily {
    Sidebar,
    Button,
    Radio,
    TextInput,
    NumberInput,
    Select,
    FileUploader,
    Heading,
    Expander,
    Metric,
    DataFrame,
    Alert,
    TabList,
    TabPanel,
    Divider,
}

impl WidgetFamily {
    /// Every family, in declaration order.
    pub const ALL: [WidgetFamily; 15] = [
        WidgetFamily::Sidebar,
        WidgetFamily::Button,
        WidgetFamily::Radio,
        WidgetFamily::TextInput,
        WidgetFamily::NumberInput,
        WidgetFamily::Select,
        WidgetFamily::FileUploader,
        WidgetFamily::Heading,
        WidgetFamily::Expander,
        WidgetFamily::Metric,
        WidgetFamily::DataFrame,
        WidgetFamily::Alert,
        WidgetFamily::TabList,
        WidgetFamily::TabPanel,
        WidgetFamily::Divider,
    ];

    /// Selector name of the family.
    pub fn name(self) -> &'static str {
        match self {
            WidgetFamily::Sidebar => "sidebar",
            WidgetFamily::Button => "button",
            WidgetFamily::Radio => "radio",
            WidgetFamily::TextInput => "text-input",
            WidgetFamily::NumberInput => "number-input",
            WidgetFamily::Select => "select",
            WidgetFamily::FileUploader => "file-uploader",
            WidgetFamily::Heading => "heading",
            WidgetFamily::Expander => "expander",
            WidgetFamily::Metric => "metric",
            WidgetFamily::DataFrame => "dataframe",
            WidgetFamily::Alert => "alert",
            WidgetFamily::TabList => "tab-list",
            WidgetFamily::TabPanel => "tab-panel",
            WidgetFamily::Divider => "divider",
        }
    }

    /// Returns true if the family is split into variant categories.
    pub fn has_variants(self) -> bool {
        matches!(self, WidgetFamily::Heading | WidgetFamily::Alert)
    }

    /// Categories belonging to this family.
    pub fn categories(self) -> impl Iterator<Item = WidgetCategory> {
        WidgetCategory::ALL
            .into_iter()
            .filter(move |c| c.family() == self)
    }

    /// Resolves a variant name (`h2`, `error`) to a category of this family.
    pub fn variant(self, name: &str) -> Result<WidgetCategory, String> {
        match self {
            WidgetFamily::Heading => HeadingLevel::from_str(name).map(WidgetCategory::Heading),
            WidgetFamily::Alert => AlertKind::from_str(name).map(WidgetCategory::Alert),
            other => Err(format!("widget '{}' has no variants", other.name())),
        }
    }

    /// The single category of a family without variants.
    pub fn sole_category(self) -> Option<WidgetCategory> {
        if self.has_variants() {
            None
        } else {
            self.categories().next()
        }
    }
}

impl fmt::Display for WidgetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetFamily::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown widget '{}'", s))
    }
}

/// Heading level, `h1` through `h4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h1" => Ok(HeadingLevel::H1),
            "h2" => Ok(HeadingLevel::H2),
            "h3" => Ok(HeadingLevel::H3),
            "h4" => Ok(HeadingLevel::H4),
            _ => Err(format!("unknown heading level '{}' (expected h1-h4)", s)),
        }
    }
}

/// Alert flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Info, AlertKind::Warning, AlertKind::Error];

    pub fn name(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertKind::Info),
            "warning" => Ok(AlertKind::Warning),
            "error" => Ok(AlertKind::Error),
            _ => Err(format!(
                "unknown alert kind '{}' (expected info, warning or error)",
                s
            )),
        }
    }
}

/// A concrete widget the host framework renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetCategory {
    Sidebar,
    Button,
    Radio,
    TextInput,
    NumberInput,
    Select,
    FileUploader,
    Heading(HeadingLevel),
    Expander,
    Metric,
    DataFrame,
    Alert(AlertKind),
    TabList,
    TabPanel,
    Divider,
}

impl WidgetCategory {
    /// Every category, in declaration order.
    pub const ALL: [WidgetCategory; 20] = [
        WidgetCategory::Sidebar,
        WidgetCategory::Button,
        WidgetCategory::Radio,
        WidgetCategory::TextInput,
        WidgetCategory::NumberInput,
        WidgetCategory::Select,
        WidgetCategory::FileUploader,
        WidgetCategory::Heading(HeadingLevel::H1),
        WidgetCategory::Heading(HeadingLevel::H2),
        WidgetCategory::Heading(HeadingLevel::H3),
        WidgetCategory::Heading(HeadingLevel::H4),
        WidgetCategory::Expander,
        WidgetCategory::Metric,
        WidgetCategory::DataFrame,
        WidgetCategory::Alert(AlertKind::Info),
        WidgetCategory::Alert(AlertKind::Warning),
        WidgetCategory::Alert(AlertKind::Error),
        WidgetCategory::TabList,
        WidgetCategory::TabPanel,
        WidgetCategory::Divider,
    ];

    pub fn family(self) -> WidgetFamily {
        match self {
            WidgetCategory::Sidebar => WidgetFamily::Sidebar,
            WidgetCategory::Button => WidgetFamily::Button,
            WidgetCategory::Radio => WidgetFamily::Radio,
            WidgetCategory::TextInput => WidgetFamily::TextInput,
            WidgetCategory::NumberInput => WidgetFamily::NumberInput,
            WidgetCategory::Select => WidgetFamily::Select,
            WidgetCategory::FileUploader => WidgetFamily::FileUploader,
            WidgetCategory::Heading(_) => WidgetFamily::Heading,
            WidgetCategory::Expander => WidgetFamily::Expander,
            WidgetCategory::Metric => WidgetFamily::Metric,
            WidgetCategory::DataFrame => WidgetFamily::DataFrame,
            WidgetCategory::Alert(_) => WidgetFamily::Alert,
            WidgetCategory::TabList => WidgetFamily::TabList,
            WidgetCategory::TabPanel => WidgetFamily::TabPanel,
            WidgetCategory::Divider => WidgetFamily::Divider,
        }
    }

    /// Variant name for categories inside a split family.
    pub fn variant_name(self) -> Option<&'static str> {
        match self {
            WidgetCategory::Heading(level) => Some(level.name()),
            WidgetCategory::Alert(kind) => Some(kind.name()),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(variant) => write!(f, "{}.{}", self.family().name(), variant),
            None => f.write_str(self.family().name()),
        }
    }
}

impl FromStr for WidgetCategory {
    type Err = String;

    /// Parses `button`, `alert.error`, `heading.h3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (family, variant) = match s.split_once('.') {
            Some((family, variant)) => (family, Some(variant)),
            None => (s, None),
        };
        let family = WidgetFamily::from_str(family)?;
        match variant {
            Some(v) => family.variant(v),
            None => family.sole_category().ok_or_else(|| {
                format!(
                    "widget '{}' needs a variant (e.g. '{}')",
                    family.name(),
                    family
                        .categories()
                        .next()
                        .map(|c| c.to_string())
                        .unwrap_or_default()
                )
            }),
        }
    }
}

/// Interaction state of a widget.
///
/// `Default` is the base state every other state falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum InteractionState {
    #[default]
    Default,
    Hover,
    Focus,
    Active,
    Selected,
}

impl InteractionState {
    pub const ALL: [InteractionState; 5] = [
        InteractionState::Default,
        InteractionState::Hover,
        InteractionState::Focus,
        InteractionState::Active,
        InteractionState::Selected,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InteractionState::Default => "default",
            InteractionState::Hover => "hover",
            InteractionState::Focus => "focus",
            InteractionState::Active => "active",
            InteractionState::Selected => "selected",
        }
    }

    pub fn is_default(self) -> bool {
        self == InteractionState::Default
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InteractionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InteractionState::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| format!("unknown state '{}'", s))
    }
}
