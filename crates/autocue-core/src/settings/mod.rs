//! User preferences that survive restarts
//!
//! Preferences live in a small `key=value` file (`~/.config/autocue.conf` by
//! default). `file` reads and writes that format; `persister` turns frequent
//! updates into infrequent atomic writes.

mod file;
mod persister;

use std::path::PathBuf;

use crate::config::ScrollConfig;
use crate::content::{normalize_word_spacing, DEFAULT_WORD_SPACING};
use crate::scroll::timing::clamp_speed;

pub use file::{format_settings, load, write_atomic};
pub use persister::{SettingsPersister, DEFAULT_QUIET_PERIOD};

const DEFAULT_FILE_NAME: &str = "autocue.conf";

pub const DEFAULT_FONT_SIZE: f32 = 30.0;
pub const MIN_FONT_SIZE: f32 = 16.0;
pub const MAX_FONT_SIZE: f32 = 96.0;
pub const FONT_SIZE_STEP: f32 = 2.0;

/// Snapshot of every persisted preference at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub speed: f64,
    pub font_size: f32,
    pub word_spacing: i32,
}

/// Preferences as read from disk; keys that were absent or invalid stay `None`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FileSettings {
    pub speed: Option<f64>,
    pub font_size: Option<f32>,
    pub word_spacing: Option<i32>,
}

/// Default preferences file, `~/.config/autocue.conf`
///
/// Resolve this once at startup and hand the result to the persister.
pub fn default_path() -> crate::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| crate::Error::Config("cannot resolve home directory".to_string()))?;
    Ok(home.join(".config").join(DEFAULT_FILE_NAME))
}

pub fn clamp_font_size(size: f32) -> f32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Fill in defaults for unset keys and clamp out-of-range values.
///
/// Every clamped value produces a warning for the user.
pub fn resolve(file: &FileSettings, scroll: &ScrollConfig) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();

    let speed = match file.speed {
        Some(speed) => {
            let clamped = clamp_speed(speed, scroll.min_speed, scroll.max_speed);
            if clamped != speed {
                warnings.push(format!("speed {:.0} out of range, clamped", speed));
            }
            clamped
        }
        None => clamp_speed(scroll.initial_speed, scroll.min_speed, scroll.max_speed),
    };

    let font_size = match file.font_size {
        Some(size) => {
            let clamped = clamp_font_size(size);
            if clamped != size {
                warnings.push(format!("font_size {:.0} out of range, clamped", size));
            }
            clamped
        }
        None => DEFAULT_FONT_SIZE,
    };

    let word_spacing = match file.word_spacing {
        Some(spacing) => {
            let normalized = normalize_word_spacing(spacing);
            if normalized != spacing {
                warnings.push(format!("word_spacing {} out of range, clamped", spacing));
            }
            normalized
        }
        None => DEFAULT_WORD_SPACING,
    };

    (
        Settings {
            speed,
            font_size,
            word_spacing,
        },
        warnings,
    )
}
