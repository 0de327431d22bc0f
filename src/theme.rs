//! Theme colors with config-file overrides.
//!
//! The palette ships with defaults; individual colors can be overridden in
//! config.toml as "#RRGGBB" or "#RGB" strings.

use ratatui::style::Color;

use crate::config::AppConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, focused fields, key hints
    pub danger: Color,      // Low scores, errors
    pub success: Color,     // Passed phases, high scores
    pub warning: Color,     // Mid scores, status messages
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Placeholders, hints, completed tasks
    pub bg_selected: Color, // Selection background
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Section headers
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(137, 180, 250),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(245, 194, 231),
        }
    }
}

impl Theme {
    /// Default palette with any overrides from the config applied.
    pub fn load(config: &AppConfig) -> Self {
        let mut theme = Self::default();

        if let Some(color) = config.accent.as_deref().and_then(Self::parse_hex_color) {
            theme.accent = color;
        }
        if let Some(color) = config.success.as_deref().and_then(Self::parse_hex_color) {
            theme.success = color;
        }
        if let Some(color) = config.danger.as_deref().and_then(Self::parse_hex_color) {
            theme.danger = color;
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        // Byte-offset slicing below; multibyte input must bail, not panic
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }

    /// Score coloring used by the results step: green from 80, amber from
    /// 60, red below.
    pub fn score_color(&self, score: u8) -> Color {
        if score >= 80 {
            self.success
        } else if score >= 60 {
            self.warning
        } else {
            self.danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            Theme::parse_hex_color("#FFC107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("121212"), Some(Color::Rgb(18, 18, 18)));
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Theme::parse_hex_color("not-a-color"), None);
        assert_eq!(Theme::parse_hex_color("#12"), None);
        // Multibyte chars can land a 6-byte string on a bad slice boundary
        assert_eq!(Theme::parse_hex_color("aaa\u{e9}a"), None);
        assert_eq!(Theme::parse_hex_color("#ffé"), None);
    }

    #[test]
    fn config_overrides_apply() {
        let config = AppConfig {
            accent: Some("#000000".to_string()),
            ..AppConfig::default()
        };
        let theme = Theme::load(&config);
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        // Untouched colors keep their defaults
        assert_eq!(theme.danger, Theme::default().danger);
    }
}
