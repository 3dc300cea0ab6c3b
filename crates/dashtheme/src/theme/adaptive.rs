//! Color mode detection.
//!
//! Light and dark palettes are separate themes; the mode only decides which
//! one a [`ThemeRegistry`](crate::ThemeRegistry) hands out. Use
//! [`set_theme_detector`] to pin the mode in tests.
//!
//! ```rust
//! use dashtheme::{detect_color_mode, set_theme_detector, ColorMode};
//!
//! set_theme_detector(|| ColorMode::Light);
//! assert_eq!(detect_color_mode(), ColorMode::Light);
//! ```

use std::fmt;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Name of the built-in theme for this mode.
    pub fn theme_name(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.theme_name())
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used by [`detect_color_mode`].
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the preferred color mode.
///
/// Queries the OS through `dark-light` unless a detector was installed with
/// [`set_theme_detector`]. When the OS gives no answer the mode is
/// [`ColorMode::Dark`], the dashboard's default palette.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        Ok(OsThemeMode::Light) => ColorMode::Light,
        Ok(_) => ColorMode::Dark,
        Err(e) => {
            log::debug!("color mode detection failed, using dark: {}", e);
            ColorMode::Dark
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detector_override() {
        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);

        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        reset_theme_detector();
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(ColorMode::Light.theme_name(), "light");
        assert_eq!(ColorMode::Dark.to_string(), "dark");
    }
}
