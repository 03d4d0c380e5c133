//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the browser, supporting
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `meadow`: Dark theme with green accents (default)
//! - `paper`: Light theme for bright terminals
//! - `plain`: No colors at all, for pipes and logs
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6f2e6"
//! header_bg = "#2f5d3a"          # optional
//! text_normal = "#d8dee9"
//! text_dim = "#7b8794"
//! border = "#4c566a"
//! accent = "#a3be8c"
//! chip_fg = "#1b2b1f"
//! chip_bg = "#a3be8c"
//! match_highlight_fg = "#1b2b1f"
//! match_highlight_bg = "#ebcb8b"
//! empty_state_fg = "#88c0d0"
//! notification_fg = "#ebcb8b"
//! ```
//!
//! # Example
//!
//! ```rust
//! use eventscout::ui::theme::Theme;
//!
//! let theme = Theme::from_name("meadow")?;
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! assert!(Theme::fg(&theme.colors.accent).starts_with("\u{1b}[38;2;"));
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

use crate::domain::error::{EventScoutError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "meadow";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// Colors are hex strings (e.g. `"#a3be8c"`). An empty string means "terminal
/// default" and emits no escape sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text (organization line, footer, pagination hints).
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    /// Event ids and section headings.
    pub accent: String,

    /// Filter chip colors.
    pub chip_fg: String,
    pub chip_bg: String,

    /// Search match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub notification_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Theme`] if the name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventscout::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("paper")?;
    /// assert_eq!(theme.name, "paper");
    /// assert!(Theme::from_name("neon").is_err());
    /// # Ok::<(), eventscout::EventScoutError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let toml_str = match name {
            "meadow" => include_str!("../../themes/meadow.toml"),
            "paper" => include_str!("../../themes/paper.toml"),
            "plain" => return Ok(Self::plain()),
            other => return Err(EventScoutError::Theme(format!("unknown theme: {other}"))),
        };

        toml::from_str(toml_str)
            .map_err(|e| EventScoutError::Theme(format!("built-in theme {name} is invalid: {e}")))
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Theme`] if the file cannot be read or its
    /// TOML cannot be parsed (invalid syntax, missing fields, type mismatches).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            EventScoutError::Theme(format!("failed to read theme file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| EventScoutError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// A theme without colors.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: ThemeColors::default(),
        }
    }

    /// Converts a hex color to an RGB tuple, `None` if it is not `#rrggbb`.
    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`), or an empty string
    /// for an empty or malformed color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[38;2;{r};{g};{b}m"))
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`), or an empty string
    /// for an empty or malformed color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[48;2;{r};{g};{b}m"))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Whether this theme emits any color at all.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.colors == ThemeColors::default()
    }
}

impl Default for Theme {
    /// Returns the `meadow` theme, or [`Theme::plain`] should it fail to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to plain theme");
            Self::plain()
        })
    }
}
