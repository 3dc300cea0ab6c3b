//! The validated, immutable theme.
//!
//! A [`Theme`] is a token table plus a priority-ordered rule list. It is
//! built once, through [`ThemeBuilder::build`] or one of the loaders, and
//! never mutated afterwards. Switching themes means replacing the whole value;
//! there is no partial update.
//!
//! # Loading
//!
//! ```rust
//! use dashtheme::Theme;
//!
//! let theme = Theme::from_css("brand", r#"
//!     :root { --primary-color: #4CAF50; }
//!     button { background-color: var(--primary-color); color: white; }
//! "#).unwrap();
//! assert_eq!(theme.tokens().len(), 1);
//! ```
//!
//! [`Theme::from_file`] picks the loader from the extension (`.css`, `.yaml`,
//! `.yml`) and names the theme after the file stem.

use std::path::{Path, PathBuf};

use super::builder::ThemeBuilder;
use crate::error::{Result, ThemeError};
use crate::style::{parse_css, parse_yaml, StyleRule};
use crate::token::{ThemeToken, TokenTable};

/// Supported document formats, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Css,
    Yaml,
}

impl ThemeFormat {
    /// Detects the format of a theme file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "css" => Some(ThemeFormat::Css),
            "yaml" | "yml" => Some(ThemeFormat::Yaml),
            _ => None,
        }
    }

    /// Parses `content` in this format.
    pub fn parse(self, name: &str, content: &str) -> Result<Theme> {
        match self {
            ThemeFormat::Css => parse_css(name, content)?.build(),
            ThemeFormat::Yaml => parse_yaml(name, content)?.build(),
        }
    }
}

/// A validated theme: tokens plus rules in cascade order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    source_path: Option<PathBuf>,
    tokens: TokenTable,
    rules: Vec<StyleRule>,
}

impl Theme {
    pub(crate) fn from_parts(name: String, tokens: TokenTable, rules: Vec<StyleRule>) -> Self {
        Theme {
            name,
            source_path: None,
            tokens,
            rules,
        }
    }

    /// Starts a programmatic theme.
    pub fn builder(name: impl Into<String>) -> ThemeBuilder {
        ThemeBuilder::new(name)
    }

    /// Loads a theme from CSS text.
    pub fn from_css(name: impl AsRef<str>, css: &str) -> Result<Self> {
        ThemeFormat::Css.parse(name.as_ref(), css)
    }

    /// Loads a theme from YAML text.
    pub fn from_yaml(name: impl AsRef<str>, yaml: &str) -> Result<Self> {
        ThemeFormat::Yaml.parse(name.as_ref(), yaml)
    }

    /// Loads a theme file.
    ///
    /// The theme name is the file stem; the path is kept for [`reload`](Theme::reload).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Io`] if the file cannot be read (including when
    /// it does not exist), [`ThemeError::UnsupportedFormat`] for an unknown
    /// extension, and any load error with the path attached.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ThemeFormat::from_path(path).ok_or_else(|| ThemeError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let mut theme = format
            .parse(name, &content)
            .map_err(|e| e.with_path(path))?;
        theme.source_path = Some(path.to_path_buf());
        log::debug!("loaded theme '{}' from {}", theme.name, path.display());
        Ok(theme)
    }

    /// Loads a fresh copy of this theme from its source file.
    ///
    /// The current value is left untouched; callers swap in the result.
    pub fn reload(&self) -> Result<Theme> {
        let path = self
            .source_path
            .as_ref()
            .ok_or_else(|| ThemeError::NoSourceFile {
                name: self.name.clone(),
            })?;
        Theme::from_file(path)
    }

    /// Returns a copy of the theme under another name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file this theme was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn token(&self, name: &str) -> Option<&ThemeToken> {
        self.tokens.get(name)
    }

    /// Rules in source order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ThemeFormat::from_path(Path::new("a/dark.css")),
            Some(ThemeFormat::Css)
        );
        assert_eq!(
            ThemeFormat::from_path(Path::new("light.yml")),
            Some(ThemeFormat::Yaml)
        );
        assert_eq!(ThemeFormat::from_path(Path::new("theme.toml")), None);
        assert_eq!(ThemeFormat::from_path(Path::new("theme")), None);
    }

    #[test]
    fn test_from_file_css() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocean.css");
        fs::write(&path, ":root { --bg: #001f3f; } sidebar { background-color: var(--bg); }")
            .unwrap();

        let theme = Theme::from_file(&path).unwrap();
        assert_eq!(theme.name(), "ocean");
        assert_eq!(theme.source_path(), Some(path.as_path()));
        assert_eq!(theme.tokens().literal("bg"), Some("#001f3f"));
    }

    #[test]
    fn test_from_file_not_found() {
        let err = Theme::from_file("/nonexistent/path/dark.css").unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let err = Theme::from_file("theme.toml").unwrap_err();
        assert!(matches!(err, ThemeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_from_file_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.css");
        fs::write(&path, ":root { color: red; }").unwrap();

        let err = Theme::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.css"), "{}", err);
    }

    #[test]
    fn test_reload_returns_new_theme() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("live.yaml");
        fs::write(&path, "tokens:\n  bg: \"#000000\"\n").unwrap();
        let first = Theme::from_file(&path).unwrap();

        fs::write(&path, "tokens:\n  bg: \"#ffffff\"\n  fg: \"#000000\"\n").unwrap();
        let second = first.reload().unwrap();

        assert_eq!(first.tokens().len(), 1);
        assert_eq!(second.tokens().len(), 2);
        assert_eq!(second.tokens().literal("bg"), Some("#ffffff"));
    }

    #[test]
    fn test_reload_without_source() {
        let theme = Theme::builder("inline").build().unwrap();
        match theme.reload().unwrap_err() {
            ThemeError::NoSourceFile { name } => assert_eq!(name, "inline"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_with_name() {
        let theme = Theme::builder("a").build().unwrap().with_name("b");
        assert_eq!(theme.name(), "b");
    }
}
