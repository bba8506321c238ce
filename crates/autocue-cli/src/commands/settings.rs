use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use autocue_core::config::ScrollConfig;
use autocue_core::settings::{self, FileSettings, Settings};
use autocue_core::AppConfig;

/// Read and resolve the preferences file.
///
/// Never fails: an unreadable file falls back to defaults with a warning.
pub fn load_preferences(path: &Path, scroll: &ScrollConfig) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();

    let file = match settings::load(path) {
        Ok((file, load_warnings)) => {
            warnings.extend(load_warnings);
            file
        }
        Err(e) => {
            warnings.push(format!("cannot read {}: {}", path.display(), e));
            FileSettings::default()
        }
    };

    let (resolved, clamp_warnings) = settings::resolve(&file, scroll);
    warnings.extend(clamp_warnings);

    for warning in &warnings {
        warn!("Preferences: {}", warning);
    }

    (resolved, warnings)
}

pub fn run(config: &AppConfig, path: std::path::PathBuf) -> Result<()> {
    print!("{}", describe(config, &path)?);
    Ok(())
}

fn describe(config: &AppConfig, path: &Path) -> Result<String> {
    let (resolved, warnings) = load_preferences(path, &config.scroll);

    let mut out = String::new();
    writeln!(out, "Preferences file: {}", path.display())?;
    if !path.exists() {
        writeln!(out, "  (not created yet, defaults in use)")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  speed        {:.0} px/s  (range {:.0}-{:.0}, step {:.0})",
        resolved.speed, config.scroll.min_speed, config.scroll.max_speed, config.scroll.step
    )?;
    writeln!(out, "  font_size    {:.0} pt", resolved.font_size)?;
    writeln!(out, "  word_spacing x{}", resolved.word_spacing)?;

    if !warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings:")?;
        for warning in &warnings {
            writeln!(out, "  - {}", warning)?;
        }
    }

    Ok(out)
}
