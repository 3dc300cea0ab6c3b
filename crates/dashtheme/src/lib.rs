//! # dashtheme - Design-Token Themes for Data Dashboards
//!
//! `dashtheme` loads dashboard themes written as CSS (or YAML), validates them
//! up front, resolves the cascade for every widget and interaction state, and
//! emits CSS aimed at the selectors of the hosting UI framework.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: an immutable token table plus an ordered list of rules
//! - [`TokenTable`]: design tokens (`--primary-color: #4CAF50`), single-level,
//!   never referring to each other
//! - [`StyleRule`]: a selector such as `button:hover` or `alert.error` with its
//!   property assignments
//! - [`WidgetCategory`] and [`InteractionState`]: what a rule can target
//! - [`ResolvedStyle`]: the concrete properties for one category and state
//! - [`WidgetBindings`]: the framework selectors that locate each category
//!
//! ## Quick Start
//!
//! ```rust
//! use dashtheme::{InteractionState, Property, Theme, WidgetCategory};
//!
//! let theme = Theme::from_css("brand", r#"
//!     :root {
//!         --primary-color: #4CAF50;
//!         --button-hover-color: #388E3C;
//!     }
//!     button { background-color: var(--primary-color); color: white; }
//!     button:hover { background-color: var(--button-hover-color); }
//! "#).unwrap();
//!
//! let hover = theme.resolve(WidgetCategory::Button, InteractionState::Hover);
//! assert_eq!(hover.get(Property::BackgroundColor), Some("#388E3C"));
//! assert_eq!(hover.get(Property::Color), Some("white"));
//! ```
//!
//! ## Fail Fast
//!
//! Every check runs when the theme is loaded. A rule that references a token
//! the theme never defines refuses the whole theme:
//!
//! ```rust
//! use dashtheme::{Theme, ThemeError};
//!
//! let err = Theme::from_css("broken", "button { color: var(--accent); }").unwrap_err();
//! assert!(matches!(err, ThemeError::UndefinedToken { .. }));
//! ```
//!
//! After loading, resolution cannot fail.
//!
//! ## The Cascade
//!
//! For a `(category, state)` pair, matching rules apply from least to most
//! specific, and in source order among equals:
//!
//! 1. family rules (`alert`)
//! 2. variant rules (`alert.error`)
//! 3. family state rules (`button:hover`)
//! 4. variant state rules (`alert.error:hover`)
//!
//! A state with no rules of its own resolves to the base style.
//!
//! ## Emitting CSS
//!
//! ```rust
//! use dashtheme::{style_block, ThemeRegistry, WidgetBindings};
//!
//! let theme = ThemeRegistry::with_builtins().get("dark").unwrap();
//! let css = theme.to_css(&WidgetBindings::dashboard_defaults()).unwrap();
//! let html = style_block(&css);
//! assert!(html.starts_with("<style>"));
//! ```
//!
//! ## Light and Dark
//!
//! Light and dark are separate, complete themes. [`ThemeRegistry::preferred`]
//! picks one from the OS color mode; switching replaces the whole theme.

pub mod bindings;
pub mod emit;
pub mod error;
pub mod registry;
pub mod style;
pub mod theme;
pub mod token;
pub mod widget;

pub use bindings::WidgetBindings;
pub use emit::{check_bindings, style_block};
pub use error::{Result, ThemeError};
pub use registry::{builtin, ThemeRegistry, THEME_EXTENSIONS};
pub use style::{
    parse_css, parse_yaml, Color, Declaration, Property, PropertyValue, Selector, Specificity,
    StyleRule, ValueKind, ValuePart,
};
pub use theme::{
    detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode, ResolvedStyle,
    ResolvedTheme, Theme, ThemeBuilder, ThemeFormat,
};
pub use token::{ThemeToken, TokenKind, TokenTable};
pub use widget::{AlertKind, HeadingLevel, InteractionState, WidgetCategory, WidgetFamily};
