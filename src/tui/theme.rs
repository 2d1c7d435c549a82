use ratatui::style::Color;

use crate::model::{ThemeName, UiConfig};

/// Dot colors cycled across column headers
pub const COLUMN_DOT_COLORS: [Color; 5] = [
    Color::Rgb(0x49, 0xC4, 0xE5),
    Color::Rgb(0x63, 0x5F, 0xC7),
    Color::Rgb(0x67, 0xE2, 0xAE),
    Color::Rgb(0xE5, 0xA4, 0x49),
    Color::Rgb(0x2A, 0x3F, 0xDB),
];

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Color,
    /// Card and popup fill
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub highlight: Color,
    pub highlight_text: Color,
    pub red: Color,
    pub green: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            name: ThemeName::Light,
            background: Color::Rgb(0xF4, 0xF7, 0xFD),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x00, 0x01, 0x12),
            dim: Color::Rgb(0x82, 0x8F, 0xA3),
            border: Color::Rgb(0xE4, 0xEB, 0xFA),
            highlight: Color::Rgb(0x63, 0x5F, 0xC7),
            highlight_text: Color::Rgb(0xFF, 0xFF, 0xFF),
            red: Color::Rgb(0xEA, 0x55, 0x55),
            green: Color::Rgb(0x67, 0xE2, 0xAE),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: ThemeName::Dark,
            background: Color::Rgb(0x20, 0x21, 0x2C),
            surface: Color::Rgb(0x2B, 0x2C, 0x37),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x82, 0x8F, 0xA3),
            border: Color::Rgb(0x3E, 0x3F, 0x4E),
            ..Theme::light()
        }
    }

    /// Base palette for `name` with `[ui.colors]` overrides applied
    pub fn from_config(name: ThemeName, ui: &UiConfig) -> Self {
        let mut theme = match name {
            ThemeName::Light => Theme::light(),
            ThemeName::Dark => Theme::dark(),
        };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring invalid color {:?} for {}", value, key);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "border" => theme.border = color,
                "highlight" => theme.highlight = color,
                "highlight_text" => theme.highlight_text = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                _ => log::warn!("unknown theme color key {:?}", key),
            }
        }

        theme
    }

    pub fn column_dot(&self, column_index: usize) -> Color {
        COLUMN_DOT_COLORS[column_index % COLUMN_DOT_COLORS.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Parse a hex color string like "#635FC7" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#635FC7"),
            Some(Color::Rgb(0x63, 0x5F, 0xC7))
        );
        assert_eq!(parse_hex_color("635FC7"), None); // missing #
        assert_eq!(parse_hex_color("#635F"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn dark_keeps_accent_colors() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_eq!(dark.highlight, light.highlight);
        assert_ne!(dark.background, light.background);
        assert_eq!(dark.name, ThemeName::Dark);
    }

    #[test]
    fn overrides_apply_to_either_palette() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#112233".into());
        ui.colors.insert("bogus".into(), "#000000".into());
        ui.colors.insert("text".into(), "not-a-color".into());

        let theme = Theme::from_config(ThemeName::Dark, &ui);
        assert_eq!(theme.highlight, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.text, Theme::dark().text);
    }

    #[test]
    fn column_dots_cycle() {
        let theme = Theme::default();
        assert_eq!(theme.column_dot(0), theme.column_dot(5));
        assert_ne!(theme.column_dot(0), theme.column_dot(1));
    }
}
