use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme described by the config. Later calls are ignored.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.clone().into_theme());
}

/// Get the active theme, falling back to the default one.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    /// Focused field and selected provider.
    pub accent: Style,
    pub error: Style,
    pub success: Style,
    pub link: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            accent: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            success: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            link: Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            accent: Style::default().fg(Color::Rgb(139, 233, 253)).add_modifier(Modifier::BOLD), // cyan
            error: Style::default().fg(Color::Rgb(255, 85, 85)),
            success: Style::default().fg(Color::Rgb(80, 250, 123)).add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::Rgb(189, 147, 249)) // purple
                .add_modifier(Modifier::UNDERLINED),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            accent: Style::default().fg(Color::Rgb(131, 165, 152)).add_modifier(Modifier::BOLD), // aqua
            error: Style::default().fg(Color::Rgb(251, 73, 52)),
            success: Style::default().fg(Color::Rgb(184, 187, 38)).add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::Rgb(250, 189, 47)) // yellow
                .add_modifier(Modifier::UNDERLINED),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            accent: Style::default().fg(Color::Rgb(136, 192, 208)).add_modifier(Modifier::BOLD), // frost
            error: Style::default().fg(Color::Rgb(191, 97, 106)),
            success: Style::default().fg(Color::Rgb(163, 190, 140)).add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::Rgb(129, 161, 193))
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

// ── TOML config types ──

/// The `[theme]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub accent_fg: Option<String>,
    pub error_fg: Option<String>,
    pub success_fg: Option<String>,
    pub link_fg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.accent_fg.as_deref().and_then(parse_color) {
            theme.accent = theme.accent.fg(c);
        }
        if let Some(c) = self.error_fg.as_deref().and_then(parse_color) {
            theme.error = theme.error.fg(c);
        }
        if let Some(c) = self.success_fg.as_deref().and_then(parse_color) {
            theme.success = theme.success.fg(c);
        }
        if let Some(c) = self.link_fg.as_deref().and_then(parse_color) {
            theme.link = theme.link.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightblue" => Some(Color::LightBlue),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#88c0d0"), Some(Color::Rgb(136, 192, 208)));
        assert_eq!(parse_color(" Red "), Some(Color::Red));
        assert_eq!(parse_color("grey"), Some(Color::Gray));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("mauve"), None);
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        assert_eq!(Theme::preset("solarized"), Theme::default());
        assert_eq!(Theme::preset("nord").name, "nord");
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("gruvbox".to_string()),
            error_fg: Some("#ff0000".to_string()),
            link_fg: Some("not-a-color".to_string()),
            ..ThemeConfig::default()
        };
        let theme = config.into_theme();
        let gruvbox = Theme::preset("gruvbox");

        assert_eq!(theme.name, "gruvbox");
        assert_eq!(theme.error.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(theme.link, gruvbox.link);
        assert_eq!(theme.accent, gruvbox.accent);
    }
}
