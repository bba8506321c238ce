use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use autocue_core::{settings, AppConfig};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "autocue")]
#[command(author, version, about = "A terminal teleprompter with hands-free scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script to display (.md, .markdown, .html, .htm or .txt)
    file: Option<PathBuf>,

    /// Preferences file (default: ~/.config/autocue.conf)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Configuration file (default: ~/.config/autocue/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file or directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start at this speed instead of the saved one
    #[arg(long)]
    speed: Option<f64>,

    /// Start scrolling immediately
    #[arg(long)]
    play: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the preferences that would be used, with any warnings
    Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let console = cli.command.is_some();
    let _log_guard = logging::init(cli.log_file.clone(), console)?;

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // --settings beats [general] settings_path beats the default location
    let settings_path = match cli
        .settings
        .clone()
        .or_else(|| config.general.settings_path.clone())
    {
        Some(path) => Ok(path),
        None => settings::default_path(),
    };

    match cli.command {
        Some(Commands::Settings) => commands::settings::run(&config, settings_path?),
        None => {
            let options = commands::run::RunOptions {
                file: cli.file,
                settings_path,
                speed: cli.speed,
                play: cli.play,
            };
            commands::run::run(config, options).await
        }
    }
}
