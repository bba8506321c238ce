//! Log setup
//!
//! While the prompter owns the terminal, logs go to a file only. Short
//! commands that print to stdout also log to stderr.
//!
//! Filter priority: `AUTOCUE_LOG`, then `RUST_LOG`, then `info`.
//!
//! Default file: `<data_local_dir>/autocue/logs/autocue.log`
//! (`~/.local/share/autocue/logs/autocue.log` on Linux). Override with
//! `--log-file <path>`; a path without an extension is taken as a directory.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "autocue.log";
const DEFAULT_FILTER: &str = "info";

/// Keep alive until exit; dropping it flushes the file writer
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init(log_file: Option<PathBuf>, console: bool) -> Result<LogGuard> {
    let (log_dir, filename) = resolve_log_path(log_file);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false)
        .with_filter(create_filter()?);

    let console_layer = if console {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(create_filter()?),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

fn create_filter() -> Result<EnvFilter> {
    let directives = env::var("AUTOCUE_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    Ok(EnvFilter::try_new(directives)?)
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| LOG_FILE_NAME.to_string());
            return (dir.to_path_buf(), name);
        }
        return (path, LOG_FILE_NAME.to_string());
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autocue")
        .join("logs");
    (dir, LOG_FILE_NAME.to_string())
}
