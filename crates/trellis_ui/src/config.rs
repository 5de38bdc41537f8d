//! UI configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! scrollbar_thickness = 10.0
//! list_spacing = 2.0
//!
//! [theme]
//! primary = "#2A5C9E"
//!
//! [styles.danger]
//! background = "#B02020"
//! hover = "#D03030"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::style::{Style, Theme};

/// Tunables shared by every widget in a context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Scrollbar width (vertical) or height (horizontal) in pixels.
    pub scrollbar_thickness: f32,
    /// Gap between list items in pixels.
    pub list_spacing: f32,
    /// Pixels scrolled per unit of wheel delta.
    pub wheel_scale: f32,
    /// Notification drain passes per phase before the rest is deferred.
    pub notification_passes: usize,
    /// Advance of one character for the monospace width estimate.
    pub font_char_width: f32,
    /// Default font size in pixels.
    pub font_size: f32,
    /// Default palette.
    pub theme: Theme,
    /// Named styles for [`crate::UiContext::apply_style`].
    pub styles: HashMap<String, Style>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scrollbar_thickness: 12.0,
            list_spacing: 4.0,
            wheel_scale: 1.0,
            notification_passes: 16,
            font_char_width: 8.0,
            font_size: 16.0,
            theme: Theme::default(),
            styles: HashMap::new(),
        }
    }
}

impl UiConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UiError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Rejects values no widget can work with.
    pub fn validate(&self) -> UiResult<()> {
        let non_negative = [
            ("scrollbar_thickness", self.scrollbar_thickness),
            ("list_spacing", self.list_spacing),
            ("font_char_width", self.font_char_width),
            ("font_size", self.font_size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(UiError::Config(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if !self.wheel_scale.is_finite() {
            return Err(UiError::Config(format!("wheel_scale must be finite, got {}", self.wheel_scale)));
        }
        if self.notification_passes == 0 {
            return Err(UiError::Config("notification_passes must be at least 1".to_owned()));
        }
        for (name, style) in &self.styles {
            if style.border_thickness.is_some_and(|t| !t.is_finite() || t < 0.0) {
                return Err(UiError::Config(format!("style '{name}' has an invalid border_thickness")));
            }
        }
        Ok(())
    }

    /// Looks up a named style.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }
}
