use std::io::{ErrorKind, Write};
use std::path::Path;

use super::{FileSettings, Settings};

/// Read preferences from `path`.
///
/// Problems with individual lines become warnings instead of errors, so a
/// hand-edited file never prevents startup. A missing file is treated as empty.
pub fn load(path: &Path) -> crate::Result<(FileSettings, Vec<String>)> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok((FileSettings::default(), Vec::new()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut settings = FileSettings::default();
    let mut warnings = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warnings.push(format!("line {} ignored (expected key=value)", line_no));
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            warnings.push(format!("{} is empty and was ignored", key));
            continue;
        }

        match key.as_str() {
            "speed" => match value.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => settings.speed = Some(parsed),
                _ => warnings.push(format!("invalid speed={:?} ignored", value)),
            },
            "font_size" => match value.parse::<f32>() {
                Ok(parsed) if parsed.is_finite() => settings.font_size = Some(parsed),
                _ => warnings.push(format!("invalid font_size={:?} ignored", value)),
            },
            "word_spacing" => match value.parse::<i32>() {
                Ok(parsed) => settings.word_spacing = Some(parsed),
                Err(_) => warnings.push(format!("invalid word_spacing={:?} ignored", value)),
            },
            _ => warnings.push(format!("unknown setting {:?} ignored", key)),
        }
    }

    Ok((settings, warnings))
}

/// Render a snapshot in the on-disk format: three lines, rounded numbers
pub fn format_settings(settings: &Settings) -> String {
    format!(
        "speed={:.0}\nfont_size={:.0}\nword_spacing={}\n",
        settings.speed, settings.font_size, settings.word_spacing
    )
}

/// Write a snapshot so that readers only ever see the old or the new file.
///
/// The content goes to a temporary file in the target directory which is then
/// renamed over `path`. The parent directory is created if needed.
pub fn write_atomic(path: &Path, settings: &Settings) -> crate::Result<()> {
    let persist_err = |source: std::io::Error| crate::Error::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(persist_err)?;

    // Dropping the temp file on an error path removes it
    let mut tmp = tempfile::Builder::new()
        .prefix("autocue-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(persist_err)?;

    tmp.write_all(format_settings(settings).as_bytes())
        .map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;

    Ok(())
}
