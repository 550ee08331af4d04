use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has effect.
pub fn init(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("theme already initialised");
    }
}

/// The active theme; defaults if [`init`] was never called.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub done: Style,
    pub reminder: Style,
    pub accent: Style,
}

/// Base colours a preset is derived from.
struct Palette {
    today: Color,
    selected: Color,
    text: Color,
    muted: Color,
    panel: Color,
    done: Color,
    reminder: Color,
    accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(
            "default",
            Palette {
                today: Color::Yellow,
                selected: Color::Cyan,
                text: Color::White,
                muted: Color::DarkGray,
                panel: Color::Gray,
                done: Color::Green,
                reminder: Color::LightYellow,
                accent: Color::Blue,
            },
        )
    }
}

impl Theme {
    fn from_palette(name: &str, p: Palette) -> Self {
        Self {
            name: name.to_string(),
            today: Style::new().fg(Color::Black).bg(p.today),
            selected: Style::new().fg(Color::Black).bg(p.selected),
            header: Style::new().fg(p.text).add_modifier(Modifier::BOLD),
            dim: Style::new().fg(p.muted),
            border: Style::new().fg(p.panel),
            status: Style::new().fg(p.text).bg(p.muted),
            done: Style::new().fg(p.done).add_modifier(Modifier::CROSSED_OUT),
            reminder: Style::new().fg(p.reminder),
            accent: Style::new().fg(p.accent).add_modifier(Modifier::BOLD),
        }
    }

    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::from_palette(
                "dracula",
                Palette {
                    today: Color::Rgb(189, 147, 249),
                    selected: Color::Rgb(139, 233, 253),
                    text: Color::Rgb(248, 248, 242),
                    muted: Color::Rgb(98, 114, 164),
                    panel: Color::Rgb(68, 71, 90),
                    done: Color::Rgb(80, 250, 123),
                    reminder: Color::Rgb(255, 184, 108),
                    accent: Color::Rgb(255, 121, 198),
                },
            ),
            "gruvbox" => Self::from_palette(
                "gruvbox",
                Palette {
                    today: Color::Rgb(250, 189, 47),
                    selected: Color::Rgb(131, 165, 152),
                    text: Color::Rgb(235, 219, 178),
                    muted: Color::Rgb(146, 131, 116),
                    panel: Color::Rgb(102, 92, 84),
                    done: Color::Rgb(184, 187, 38),
                    reminder: Color::Rgb(254, 128, 25),
                    accent: Color::Rgb(69, 133, 136),
                },
            ),
            "nord" => Self::from_palette(
                "nord",
                Palette {
                    today: Color::Rgb(235, 203, 139),
                    selected: Color::Rgb(136, 192, 208),
                    text: Color::Rgb(229, 233, 240),
                    muted: Color::Rgb(76, 86, 106),
                    panel: Color::Rgb(67, 76, 94),
                    done: Color::Rgb(163, 190, 140),
                    reminder: Color::Rgb(208, 135, 112),
                    accent: Color::Rgb(94, 129, 172),
                },
            ),
            other => {
                if other != "default" {
                    tracing::warn!(preset = other, "unknown theme preset, using default");
                }
                Self::default()
            }
        }
    }
}

/// `[theme]` table of the config file: a preset plus per-style overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_bg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub done_fg: Option<String>,
    pub reminder_fg: Option<String>,
    pub accent_fg: Option<String>,
}

impl ThemeConfig {
    pub fn build(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let overrides: [(&Option<String>, fn(&mut Theme, Color)); 10] = [
            (&self.today_bg, |t, c| t.today = t.today.bg(c)),
            (&self.selected_bg, |t, c| t.selected = t.selected.bg(c)),
            (&self.header_fg, |t, c| t.header = t.header.fg(c)),
            (&self.dim_fg, |t, c| t.dim = t.dim.fg(c)),
            (&self.border_fg, |t, c| t.border = t.border.fg(c)),
            (&self.status_fg, |t, c| t.status = t.status.fg(c)),
            (&self.status_bg, |t, c| t.status = t.status.bg(c)),
            (&self.done_fg, |t, c| t.done = t.done.fg(c)),
            (&self.reminder_fg, |t, c| t.reminder = t.reminder.fg(c)),
            (&self.accent_fg, |t, c| t.accent = t.accent.fg(c)),
        ];

        for (value, apply) in overrides {
            let Some(raw) = value.as_deref() else { continue };
            match parse_color(raw) {
                Some(color) => apply(&mut theme, color),
                None => tracing::warn!(color = raw, "ignoring unparseable theme color"),
            }
        }

        theme
    }
}

/// Parse "#rrggbb" or a basic terminal color name.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let color = match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Dark-Gray "), Some(Color::DarkGray));
        assert_eq!(parse_color("light_blue"), Some(Color::LightBlue));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("nord".to_string()),
            done_fg: Some("red".to_string()),
            selected_bg: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let theme = config.build();

        assert_eq!(theme.name, "nord");
        assert_eq!(theme.done.fg, Some(Color::Red));
        assert_eq!(theme.selected.bg, Some(Color::Rgb(136, 192, 208)));
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        assert_eq!(Theme::preset("solarized").name, "default");
    }
}
