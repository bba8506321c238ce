use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info, warn};

use autocue_core::{content, config::ScrollConfig, AppConfig, ScrollEngine, SettingsPersister};
use autocue_tui::{
    app::{App, Document, Preferences},
    event::{AppEvent, EventHandler},
    input::{apply_action, handle_key_event},
    load_theme, view, Theme,
};

use super::settings::load_preferences;

pub struct RunOptions {
    pub file: Option<PathBuf>,
    /// Where preferences are read from and saved to
    pub settings_path: autocue_core::Result<PathBuf>,
    pub speed: Option<f64>,
    pub play: bool,
}

pub async fn run(config: AppConfig, options: RunOptions) -> Result<()> {
    // Open the script before touching the terminal so errors print normally
    let document = options.file.as_deref().map(load_document).transpose()?;

    let mut warnings = Vec::new();
    let (preferences, persister) = match options.settings_path {
        Ok(path) => {
            let (resolved, load_warnings) = load_preferences(&path, &config.scroll);
            warnings.extend(load_warnings);
            (resolved, Some(SettingsPersister::new(path)))
        }
        Err(e) => {
            warn!("Preferences will not be saved: {}", e);
            warnings.push(format!("preferences will not be saved: {}", e));
            let (resolved, _) = autocue_core::settings::resolve(&Default::default(), &config.scroll);
            (resolved, None)
        }
    };

    // The engine runs on its own task; deltas are queued for the UI loop
    let (mut events, delta_tx) = EventHandler::new(config.ui.poll_rate_ms);
    let scroll = ScrollConfig {
        initial_speed: preferences.speed,
        ..config.scroll.clone()
    };
    let engine = ScrollEngine::new(&scroll, move |delta| {
        let _ = delta_tx.send(delta);
    });

    if let Some(speed) = options.speed {
        let applied = engine.set_speed(speed);
        if applied != speed {
            warnings.push(format!("--speed {:.0} out of range, using {:.0}", speed, applied));
        }
    }

    let mut app = App::new(
        engine,
        persister,
        Preferences {
            font_size: preferences.font_size,
            word_spacing: preferences.word_spacing,
        },
    );
    app.set_warnings(warnings);
    if let Some(document) = document {
        app.load_document(document);
    }
    if options.play {
        app.play();
    }

    let theme = load_theme(&config.ui.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("autocue"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        &mut events,
        &theme,
        config.ui.show_status_bar,
    );

    let restored = restore_terminal(&mut terminal);
    finish(&app, result, restored).await
}

/// Leave raw mode and the alternate screen, attempting every step
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw?;
    screen?;
    cursor?;
    Ok(())
}

/// Shut the app down whatever happened before, then report the first error
async fn finish(app: &App, result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(e) = &restored {
        error!("Failed to restore terminal: {:#}", e);
    }

    // Stop the engine first so no delta lands after the final save
    if let Err(e) = app.shutdown().await {
        eprintln!("warning: could not save preferences: {}", e);
    }
    info!("Prompter closed");

    result.and(restored)
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
    theme: &Theme,
    show_status_bar: bool,
) -> Result<()> {
    loop {
        for delta in events.drain_deltas() {
            app.apply_delta(delta);
        }

        terminal.draw(|frame| view::draw(frame, app, theme, show_status_bar))?;

        match events.next()? {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, app);
                if !apply_action(action, app) {
                    return Ok(());
                }
            }
            // The next draw picks up the new size
            AppEvent::Resize(..) => {}
            AppEvent::Tick | AppEvent::Ignored => {}
        }
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let (text, format) = content::load_from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document { name, text, format })
}
