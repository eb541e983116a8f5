//! Terminal styling for risk reports.
//!
//! Colour follows the usual conventions: `NO_COLOR` and `CLICOLOR=0` turn it
//! off, `CLICOLOR_FORCE=1` forces it on, otherwise it is used when stdout is a
//! terminal. Unicode markers are replaced by ASCII in plain mode or when the
//! locale does not look like UTF-8.

use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// How alarming a value is; drives its colour and marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Caution,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub unicode: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

impl FormattingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if env::var("CLICOLOR").is_ok_and(|val| val == "0") {
            config.color = ColorMode::Never;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|val| val == "1") {
            config.color = ColorMode::Always;
        }

        config.unicode = locale_supports_unicode();
        config
    }

    /// ASCII-only, no colors
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            unicode: false,
        }
    }
}

fn locale_supports_unicode() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .map(|value| {
            let value = value.to_uppercase();
            value.contains("UTF-8") || value.contains("UTF8")
        })
        .unwrap_or(cfg!(not(windows)))
}

/// Applies a [`FormattingConfig`] to text.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
    unicode: bool,
}

impl Palette {
    pub fn new(config: FormattingConfig) -> Self {
        let color = config.color.should_use_color();
        colored::control::set_override(color);
        Self {
            color,
            unicode: config.unicode,
        }
    }

    pub fn severity(&self, text: &str, severity: Severity) -> String {
        if !self.color {
            return text.to_string();
        }
        match severity {
            Severity::Ok => text.green().to_string(),
            Severity::Caution => text.yellow().to_string(),
            Severity::Danger => text.red().bold().to_string(),
        }
    }

    pub fn marker(&self, severity: Severity) -> &'static str {
        match (self.unicode, severity) {
            (true, Severity::Ok) => "●",
            (true, Severity::Caution) => "▲",
            (true, Severity::Danger) => "■",
            (false, Severity::Ok) => "[ok]",
            (false, Severity::Caution) => "[!]",
            (false, Severity::Danger) => "[!!]",
        }
    }

    pub fn header(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bar(&self, percentage: f64, width: usize) -> String {
        let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        let (full, empty) = if self.unicode { ("█", "░") } else { ("#", ".") };
        format!("{}{}", full.repeat(filled), empty.repeat(width - filled))
    }

    pub fn bullet(&self) -> &'static str {
        if self.unicode {
            "•"
        } else {
            "-"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_config_disables_color_and_unicode() {
        let config = FormattingConfig::plain();
        assert_eq!(config.color, ColorMode::Never);
        assert!(!config.unicode);
    }

    #[test]
    fn test_plain_palette_leaves_text_untouched() {
        let palette = Palette::new(FormattingConfig::plain());
        assert_eq!(palette.severity("High", Severity::Danger), "High");
        assert_eq!(palette.header("Weekly"), "Weekly");
        assert_eq!(palette.marker(Severity::Caution), "[!]");
    }

    #[test]
    fn test_bar_fills_proportionally() {
        let palette = Palette::new(FormattingConfig::plain());
        assert_eq!(palette.bar(50.0, 10), "#####.....");
        assert_eq!(palette.bar(120.0, 4), "####");
        assert_eq!(palette.bar(0.0, 4), "....");
    }
}
