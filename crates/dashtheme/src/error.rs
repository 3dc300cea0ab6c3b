//! Error types for theme loading.
//!
//! Every failure happens while a theme is being loaded and validated. Once a
//! [`Theme`](crate::Theme) exists, resolving styles from it cannot fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::widget::WidgetCategory;

/// Errors raised while parsing, validating, loading or emitting a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Syntax error in a theme document.
    #[error("failed to parse theme{}: line {line}, column {column}: {message}", location(.path))]
    Parse {
        /// Source file, when the document came from disk.
        path: Option<PathBuf>,
        /// 1-based line of the offending token.
        line: u32,
        /// 1-based column of the offending token.
        column: u32,
        /// What the parser expected or rejected.
        message: String,
    },

    /// Structurally invalid document (wrong YAML shape, bad keys).
    #[error("invalid theme document{}: {message}", location(.path))]
    InvalidDocument {
        /// Source file, when the document came from disk.
        path: Option<PathBuf>,
        /// Description of what was wrong.
        message: String,
    },

    /// A rule references a token that the table does not define.
    #[error("rule '{selector}' references undefined token '--{token}' in '{property}'")]
    UndefinedToken {
        /// The missing token name (without the `--` prefix).
        token: String,
        /// Selector text of the rule holding the reference.
        selector: String,
        /// Property whose value holds the reference.
        property: String,
    },

    /// A token is defined more than once.
    #[error("token '--{token}' is defined more than once")]
    DuplicateToken {
        /// The duplicated token name.
        token: String,
    },

    /// A token value references another token.
    #[error("token '--{token}' references '--{reference}'; token values must be literals")]
    ChainedToken {
        /// The token being defined.
        token: String,
        /// The token it tried to reference.
        reference: String,
    },

    /// A token has an empty or otherwise unusable value.
    #[error("token '--{token}' has an invalid value: {message}")]
    InvalidToken {
        /// The token name.
        token: String,
        /// Description of what was wrong.
        message: String,
    },

    /// A selector could not be parsed.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector text.
        selector: String,
        /// Description of what was wrong.
        message: String,
    },

    /// A rule assigns a property outside the supported set.
    #[error("unknown property '{property}' in rule '{selector}'")]
    UnknownProperty {
        /// The property name as written.
        property: String,
        /// Selector text of the rule.
        selector: String,
    },

    /// A property value is malformed or has the wrong type.
    #[error("invalid value '{value}' for '{property}' in rule '{selector}': {message}")]
    InvalidValue {
        /// Selector text of the rule.
        selector: String,
        /// The property name.
        property: String,
        /// The value as written.
        value: String,
        /// Description of what was wrong.
        message: String,
    },

    /// A color property references a token that does not hold a color.
    #[error(
        "'{property}' in rule '{selector}' expects a color but token '--{token}' holds '{value}'"
    )]
    TokenTypeMismatch {
        /// Selector text of the rule.
        selector: String,
        /// The color property.
        property: String,
        /// The referenced token.
        token: String,
        /// The token's literal value.
        value: String,
    },

    /// Emission needs a framework selector for a category that has none.
    #[error("no framework selector is bound for widget '{category}'")]
    UnboundCategory {
        /// The category without a binding.
        category: WidgetCategory,
    },

    /// A theme file has an extension no loader understands.
    #[error("unsupported theme format: {}", .path.display())]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
    },

    /// A theme name did not resolve in the registry.
    #[error("theme not found: {name}")]
    NotFound {
        /// The requested name.
        name: String,
    },

    /// `reload` was called on a theme that was not loaded from a file.
    #[error("theme '{name}' has no source file to reload from")]
    NoSourceFile {
        /// Name of the theme.
        name: String,
    },

    /// A theme compiled into the crate failed to load.
    #[error("built-in theme '{name}' is invalid: {message}")]
    InvalidBuiltin {
        /// Name of the built-in theme.
        name: String,
        /// The load error.
        message: String,
    },

    /// Reading a theme file or directory failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ThemeError {
    /// Attaches a source path to parse and document errors that lack one.
    pub(crate) fn with_path(self, source: impl Into<PathBuf>) -> Self {
        match self {
            ThemeError::Parse {
                path: None,
                line,
                column,
                message,
            } => ThemeError::Parse {
                path: Some(source.into()),
                line,
                column,
                message,
            },
            ThemeError::InvalidDocument {
                path: None,
                message,
            } => ThemeError::InvalidDocument {
                path: Some(source.into()),
                message,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
