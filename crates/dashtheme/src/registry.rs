//! Named theme lookup across inline, file and built-in sources.
//!
//! # Resolution
//!
//! [`ThemeRegistry::get`] looks a name up in this order:
//!
//! 1. Inline themes added with [`add_inline_css`](ThemeRegistry::add_inline_css),
//!    [`add_inline_yaml`](ThemeRegistry::add_inline_yaml) or
//!    [`add_theme`](ThemeRegistry::add_theme)
//! 2. Theme directories, in registration order (first directory wins)
//! 3. Built-in themes (`dark`, `light`), if enabled
//!
//! Names work with or without extension: `"ocean"` and `"ocean.css"` both
//! resolve `ocean.css`. When one directory holds several files for a name,
//! the extension earliest in [`THEME_EXTENSIONS`] wins.
//!
//! File themes are read and validated on every lookup, so an edited file is
//! picked up by the next `get` and a broken edit is reported there.
//!
//! ```rust
//! use dashtheme::{ColorMode, ThemeRegistry};
//!
//! let registry = ThemeRegistry::with_builtins();
//! let theme = registry.for_mode(ColorMode::Dark).unwrap();
//! assert_eq!(theme.name(), "dark");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::error::{Result, ThemeError};
use crate::theme::{detect_color_mode, ColorMode, Theme};

/// Recognized theme file extensions in priority order.
pub const THEME_EXTENSIONS: &[&str] = &[".css", ".yaml", ".yml"];

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("dark", include_str!("../themes/dark.css")),
    ("light", include_str!("../themes/light.css")),
];

type BuiltinTable = BTreeMap<&'static str, std::result::Result<Theme, String>>;

static BUILTINS: Lazy<BuiltinTable> = Lazy::new(|| load_builtins(BUILTIN_SOURCES));

fn load_builtins(sources: &[(&'static str, &'static str)]) -> BuiltinTable {
    sources
        .iter()
        .map(|&(name, css)| {
            let theme = Theme::from_css(name, css).map_err(|e| {
                log::error!("built-in theme '{}' failed to load: {}", name, e);
                e.to_string()
            });
            (name, theme)
        })
        .collect()
}

fn lookup_builtin(table: &BuiltinTable, name: &str) -> Result<Theme> {
    match table.get(name) {
        Some(Ok(theme)) => Ok(theme.clone()),
        Some(Err(message)) => Err(ThemeError::InvalidBuiltin {
            name: name.to_string(),
            message: message.clone(),
        }),
        None => Err(ThemeError::NotFound {
            name: name.to_string(),
        }),
    }
}

/// Returns a built-in theme by name.
///
/// # Errors
///
/// [`ThemeError::NotFound`] for an unknown name, [`ThemeError::InvalidBuiltin`]
/// if the compiled-in source failed to load.
pub fn builtin(name: &str) -> Result<Theme> {
    lookup_builtin(&BUILTINS, name)
}

/// Registry of named themes.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    inline: HashMap<String, Theme>,
    dirs: Vec<PathBuf>,
    builtins: bool,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that falls back to the built-in `dark` and `light` themes.
    pub fn with_builtins() -> Self {
        ThemeRegistry {
            builtins: true,
            ..Self::default()
        }
    }

    /// Adds an inline theme from CSS. Inline themes shadow everything else.
    pub fn add_inline_css(&mut self, name: impl Into<String>, css: &str) -> Result<()> {
        let name = name.into();
        let theme = Theme::from_css(&name, css)?;
        self.inline.insert(name, theme);
        Ok(())
    }

    /// Adds an inline theme from YAML.
    pub fn add_inline_yaml(&mut self, name: impl Into<String>, yaml: &str) -> Result<()> {
        let name = name.into();
        let theme = Theme::from_yaml(&name, yaml)?;
        self.inline.insert(name, theme);
        Ok(())
    }

    /// Adds an already built theme under `name`.
    pub fn add_theme(&mut self, name: impl Into<String>, theme: Theme) {
        let name = name.into();
        let theme = theme.with_name(name.clone());
        self.inline.insert(name, theme);
    }

    /// Adds a directory to search for theme files.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Io`] if the path does not exist or is not a
    /// directory.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ThemeError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    /// Looks up a theme by name, with or without extension.
    ///
    /// # Errors
    ///
    /// [`ThemeError::NotFound`] if no source has the name; any load error of
    /// the file that does.
    pub fn get(&self, name: &str) -> Result<Theme> {
        let base = strip_extension(name);

        if let Some(theme) = self.inline.get(name).or_else(|| self.inline.get(base)) {
            return Ok(theme.clone());
        }

        let mut found: Option<PathBuf> = None;
        for dir in &self.dirs {
            let Some(path) = find_in_dir(dir, name) else {
                continue;
            };
            match &found {
                None => found = Some(path),
                Some(winner) => log::warn!(
                    "theme '{}' at {} is shadowed by {}",
                    base,
                    path.display(),
                    winner.display()
                ),
            }
        }
        if let Some(path) = found {
            log::debug!("resolved theme '{}' to {}", name, path.display());
            return Ok(Theme::from_file(&path)?.with_name(base));
        }

        if self.builtins && BUILTINS.contains_key(base) {
            return builtin(base);
        }

        Err(ThemeError::NotFound {
            name: name.to_string(),
        })
    }

    /// Returns true if `name` resolves to some source.
    pub fn contains(&self, name: &str) -> bool {
        let base = strip_extension(name);
        self.inline.contains_key(name)
            || self.inline.contains_key(base)
            || self.dirs.iter().any(|d| find_in_dir(d, name).is_some())
            || (self.builtins && BUILTINS.contains_key(base))
    }

    /// Every resolvable theme name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.inline.keys().cloned().collect();

        for dir in &self.dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(file_name) = file_name.to_str() else {
                    continue;
                };
                if THEME_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
                    names.insert(strip_extension(file_name).to_string());
                }
            }
        }

        if self.builtins {
            names.extend(BUILTINS.keys().map(|k| k.to_string()));
        }
        names.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// The theme named after `mode` (`"light"` or `"dark"`).
    pub fn for_mode(&self, mode: ColorMode) -> Result<Theme> {
        self.get(mode.theme_name())
    }

    /// The theme for the detected color mode.
    pub fn preferred(&self) -> Result<Theme> {
        self.for_mode(detect_color_mode())
    }
}

fn strip_extension(name: &str) -> &str {
    THEME_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    if strip_extension(name) != name {
        let path = dir.join(name);
        return path.is_file().then_some(path);
    }
    THEME_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}{}", name, ext)))
        .find(|path| path.is_file())
}
