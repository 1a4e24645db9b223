//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents, either built in (Catppuccin variants) or loaded
//! from a user-supplied file. Colors are hex strings converted to 24-bit ANSI
//! escapes at render time.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme (default)
//! - `catppuccin-latte`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! focus_border = "#89b4fa"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! warning_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! button_fg = "#1e1e2e"
//! button_bg = "#a6e3a1"
//! ```

use crate::domain::{Result, SimplifierError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, placeholders and secondary info.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,
    /// Separator above the focused pane.
    pub focus_border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Valid verdicts and simplified output.
    pub success_fg: String,
    /// Blocked outcomes and the alert banner.
    pub warning_fg: String,
    /// Invalid verdicts and failed outcomes.
    pub error_fg: String,

    /// Enabled submit button.
    pub button_fg: String,
    pub button_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifierError::Theme`] if the file cannot be read or does
    /// not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| SimplifierError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| SimplifierError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in Catppuccin Mocha theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        let latte = Theme::from_name("catppuccin-latte").expect("latte parses");
        assert_eq!(latte.name, "catppuccin-latte");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn theme_file_round_trips_through_toml() {
        let theme = Theme::from_name("catppuccin-latte").expect("latte parses");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let rendered = toml::to_string(&theme).expect("serializable");
        file.write_all(rendered.as_bytes()).expect("writable");

        assert_eq!(Theme::from_file(file.path()).expect("loads"), theme);
    }

    #[test]
    fn incomplete_theme_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"\n")
            .expect("writable");

        match Theme::from_file(file.path()) {
            Err(SimplifierError::Theme(message)) => assert!(message.contains("parse")),
            other => panic!("expected theme error, got {other:?}"),
        }
    }

    #[test]
    fn hex_colors_become_ansi_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }
}
