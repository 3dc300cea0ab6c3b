//! Themes: construction, loading, resolution and color mode.
//!
//! - [`ThemeBuilder`] collects tokens and rules and validates them.
//! - [`Theme`] is the immutable result, loadable from CSS, YAML or a file.
//! - [`Theme::resolve`] runs the cascade for one category and state.
//! - [`ColorMode`] picks between light and dark themes.

mod adaptive;
mod builder;
mod resolve;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use builder::ThemeBuilder;
pub use resolve::{ResolvedStyle, ResolvedTheme};
pub use theme::{Theme, ThemeFormat};
