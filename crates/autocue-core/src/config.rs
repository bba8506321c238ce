use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Override for the preferences file (speed, font size, word spacing)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

/// Autoscroll bounds and timing, fixed for the lifetime of a ScrollEngine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Lowest speed in distance units per second
    #[serde(default = "default_min_speed")]
    pub min_speed: f64,
    /// Highest speed in distance units per second
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    /// Amount added or removed by one speed up / speed down
    #[serde(default = "default_step")]
    pub step: f64,
    /// Speed used when nothing was persisted
    #[serde(default = "default_speed")]
    pub initial_speed: f64,
    /// Timer period between two deltas
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            step: default_step(),
            initial_speed: default_speed(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl ScrollConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Reject bounds the engine cannot honor
    pub fn validate(&self) -> crate::Result<()> {
        if !self.min_speed.is_finite() || !self.max_speed.is_finite() || !self.step.is_finite() {
            return Err(crate::Error::Config(
                "scroll speeds must be finite numbers".to_string(),
            ));
        }
        if self.min_speed < 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll.min_speed must not be negative (got {})",
                self.min_speed
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(crate::Error::Config(format!(
                "scroll.min_speed ({}) is greater than scroll.max_speed ({})",
                self.min_speed, self.max_speed
            )));
        }
        if self.step <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll.step must be positive (got {})",
                self.step
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(crate::Error::Config(
                "scroll.tick_rate_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal input poll timeout in milliseconds
    #[serde(default = "default_poll_rate")]
    pub poll_rate_ms: u64,
    /// Show the status bar below the prompter view
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_rate_ms: default_poll_rate(),
            show_status_bar: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// "dark" (light text on black) or "light"
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(default)]
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

/// Each color is a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub background: Option<String>,
    pub text: Option<String>,
    /// Reading line marker and highlights
    pub accent: Option<String>,
    /// Status bar hints and rows outside the reading band
    pub muted: Option<String>,
    pub warning: Option<String>,
}

fn default_min_speed() -> f64 {
    20.0
}

fn default_max_speed() -> f64 {
    300.0
}

fn default_step() -> f64 {
    20.0
}

fn default_speed() -> f64 {
    20.0
}

fn default_tick_rate() -> u64 {
    33 // ~30 Hz
}

fn default_poll_rate() -> u64 {
    50
}

fn default_true() -> bool {
    true
}

fn default_theme_name() -> String {
    "dark".to_string()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        config.scroll.validate()?;
        Ok(config)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/autocue/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("autocue")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scroll.min_speed, 20.0);
        assert_eq!(config.scroll.max_speed, 300.0);
        assert_eq!(config.scroll.step, 20.0);
        assert_eq!(config.scroll.initial_speed, 20.0);
        assert_eq!(config.scroll.tick_duration(), Duration::from_millis(33));
        assert!(config.ui.show_status_bar);
        assert!(config.general.settings_path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [scroll]
            max_speed = 500.0

            [ui]
            theme = { name = "light" }
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.max_speed, 500.0);
        assert_eq!(config.scroll.min_speed, 20.0);
        assert_eq!(config.ui.theme.name, "light");
        assert_eq!(config.ui.poll_rate_ms, 50);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = ScrollConfig {
            min_speed: 200.0,
            max_speed: 100.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = ScrollConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(ScrollConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.scroll, ScrollConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scroll\nmin_speed = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(crate::Error::Config(_))
        ));
    }
}
