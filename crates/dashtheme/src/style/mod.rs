//! Theme documents: colors, properties, values, selectors and the CSS/YAML
//! loaders that turn text into a [`ThemeBuilder`](crate::ThemeBuilder).
//!
//! # Pipeline
//!
//! 1. **Parse**: CSS ([`parse_css`]) or YAML ([`parse_yaml`]) text becomes a
//!    builder holding raw tokens and rules. Only syntax is checked here.
//! 2. **Build**: [`ThemeBuilder::build`](crate::ThemeBuilder::build) parses
//!    selectors and values, checks every token reference, and resolves each
//!    declaration to its literal.
//!
//! # Module Structure
//!
//! - [`color`]: color literal parsing
//! - [`property`]: the closed set of themable properties
//! - [`value`]: property values with `var(--token)` references
//! - [`rule`]: selectors, declarations and rules
//! - [`css`] / [`yaml`]: document loaders

pub mod color;
pub mod css;
pub mod property;
pub mod rule;
pub mod value;
pub mod yaml;

pub use color::Color;
pub use css::parse_css;
pub use property::{Property, ValueKind};
pub use rule::{Declaration, Selector, Specificity, StyleRule};
pub use value::{PropertyValue, ValuePart};
pub use yaml::parse_yaml;
