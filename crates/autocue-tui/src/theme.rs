use autocue_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub heading: Color,
    pub accent: Color,
    pub muted: Color,
    pub warning: Color,
    pub status_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Light text on black, the usual prompter glass setup
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x00, 0x00, 0x00),
            text: Color::Rgb(0xf2, 0xf2, 0xf2),
            heading: Color::Rgb(0xff, 0xd8, 0x66),
            accent: Color::Rgb(0x7d, 0xae, 0xa3),
            muted: Color::Rgb(0xa8, 0x99, 0x84),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            status_bg: Color::Rgb(0x28, 0x28, 0x28),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xfb, 0xf8, 0xef),
            text: Color::Rgb(0x1d, 0x20, 0x21),
            heading: Color::Rgb(0x07, 0x66, 0x78),
            accent: Color::Rgb(0x42, 0x7b, 0x58),
            muted: Color::Rgb(0x7c, 0x6f, 0x64),
            warning: Color::Rgb(0xaf, 0x3a, 0x03),
            status_bg: Color::Rgb(0xeb, 0xdb, 0xb2),
        }
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Build the theme named in config, then apply color overrides
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "light" => Theme::light(),
        "dark" => Theme::dark(),
        other => {
            tracing::warn!("Unknown theme '{}', falling back to dark", other);
            Theme::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        (&overrides.background, &mut theme.background),
        (&overrides.text, &mut theme.text),
        (&overrides.accent, &mut theme.accent),
        (&overrides.muted, &mut theme.muted),
        (&overrides.warning, &mut theme.warning),
    ];

    for (hex, slot) in slots {
        let Some(hex) = hex else { continue };
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => tracing::warn!("Ignoring invalid theme color '{}'", hex),
        }
    }

    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("nope"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_load_theme_with_overrides() {
        let config = ThemeConfig {
            name: "light".to_string(),
            colors: ThemeColorOverrides {
                text: Some("#123456".to_string()),
                accent: Some("bad".to_string()),
                ..Default::default()
            },
        };

        let theme = load_theme(&config);
        assert_eq!(theme.text, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.accent, Theme::light().accent);
        assert_eq!(theme.background, Theme::light().background);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "neon".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config), Theme::dark());
    }
}
