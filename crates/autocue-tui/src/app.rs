use autocue_core::content::{self, Block, Format};
use autocue_core::settings::{self, Settings, DEFAULT_FONT_SIZE, FONT_SIZE_STEP};
use autocue_core::{ScrollEngine, SettingsPersister};
use tracing::{debug, info};

use crate::layout::{column_width, line_height, wrap_blocks, Row};

/// Text size and word spacing, the preferences owned by the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub font_size: f32,
    pub word_spacing: i32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            word_spacing: content::DEFAULT_WORD_SPACING,
        }
    }
}

/// A loaded script
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub text: String,
    pub format: Format,
}

/// Prompter state, owned by the UI loop
///
/// The scroll offset is only ever changed here. Engine deltas are queued by
/// the engine task and handed to [`App::apply_delta`] by the UI loop.
pub struct App {
    engine: ScrollEngine,
    persister: Option<SettingsPersister>,
    font_size: f32,
    word_spacing: i32,
    document: Option<Document>,
    blocks: Vec<Block>,
    rows: Vec<Row>,
    /// Top visible row, fractional so slow speeds still advance
    offset: f64,
    viewport_width: u16,
    viewport_height: u16,
    warnings: Vec<String>,
    show_warnings: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        engine: ScrollEngine,
        persister: Option<SettingsPersister>,
        preferences: Preferences,
    ) -> Self {
        Self {
            engine,
            persister,
            font_size: settings::clamp_font_size(preferences.font_size),
            word_spacing: content::normalize_word_spacing(preferences.word_spacing),
            document: None,
            blocks: Vec::new(),
            rows: Vec::new(),
            offset: 0.0,
            viewport_width: 0,
            viewport_height: 0,
            warnings: Vec::new(),
            show_warnings: false,
            status_message: None,
        }
    }

    pub fn load_document(&mut self, document: Document) {
        info!("Loaded '{}' ({:?})", document.name, document.format);
        self.blocks = content::prepare(&document.text, document.format, self.word_spacing);
        self.document = Some(document);
        self.offset = 0.0;
        self.relayout();
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.name.as_str())
    }

    /// Record the prompter area; re-wraps when it changed
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.relayout();
    }

    pub fn column_width(&self) -> u16 {
        column_width(self.viewport_width, self.font_size)
    }

    /// Re-wrap rows, keeping the reading position proportionally
    fn relayout(&mut self) {
        let old_len = self.rows.len();
        let ratio = if old_len > 0 {
            self.offset / old_len as f64
        } else {
            0.0
        };

        self.rows = wrap_blocks(&self.blocks, self.column_width());
        self.offset = (ratio * self.rows.len() as f64).clamp(0.0, self.max_offset().max(0.0));
        debug!(
            rows = self.rows.len(),
            width = self.column_width(),
            "Relayout"
        );
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows visible in the viewport starting at the current offset
    pub fn visible_rows(&self) -> &[Row] {
        let start = (self.offset.floor() as usize).min(self.rows.len());
        let end = (start + usize::from(self.viewport_height)).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Content height minus viewport height, in rows
    pub fn max_offset(&self) -> f64 {
        self.rows.len() as f64 - f64::from(self.viewport_height)
    }

    /// Reading progress in percent
    pub fn progress(&self) -> u16 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 100;
        }
        ((self.offset / max) * 100.0).round().clamp(0.0, 100.0) as u16
    }

    /// Advance by one engine delta (distance units at the current text size)
    ///
    /// Pauses the engine when the content fits the viewport or the end is reached.
    pub fn apply_delta(&mut self, delta: f64) {
        let max = self.max_offset();
        if max <= 0.0 {
            self.engine.pause();
            return;
        }

        let mut next = self.offset + delta / line_height(self.font_size);
        if next >= max {
            next = max;
            self.engine.pause();
            self.status_message = Some("End of script".to_string());
        }
        self.offset = next;
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn speed(&self) -> f64 {
        self.engine.speed()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn word_spacing(&self) -> i32 {
        self.word_spacing
    }

    pub fn play(&mut self) {
        self.status_message = None;
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn toggle_play(&mut self) {
        self.status_message = None;
        self.engine.toggle();
    }

    pub fn speed_up(&mut self) {
        self.engine.speed_up();
        self.save_settings();
    }

    pub fn speed_down(&mut self) {
        self.engine.speed_down();
        self.save_settings();
    }

    pub fn font_size_up(&mut self) {
        self.set_font_size(self.font_size + FONT_SIZE_STEP);
    }

    pub fn font_size_down(&mut self) {
        self.set_font_size(self.font_size - FONT_SIZE_STEP);
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = settings::clamp_font_size(size);
        self.relayout();
        self.save_settings();
    }

    pub fn change_word_spacing(&mut self, delta: i32) {
        self.word_spacing = content::normalize_word_spacing(self.word_spacing + delta);
        if let Some(doc) = &self.document {
            self.blocks = content::prepare(&doc.text, doc.format, self.word_spacing);
        }
        self.relayout();
        self.save_settings();
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0.0;
    }

    /// Move one viewport up (`direction < 0`) or down
    pub fn page(&mut self, direction: i32) {
        let step = f64::from(self.viewport_height.max(1)) * f64::from(direction.signum());
        self.offset = (self.offset + step).clamp(0.0, self.max_offset().max(0.0));
    }

    /// Snapshot of every persisted preference
    pub fn settings_snapshot(&self) -> Settings {
        Settings {
            speed: self.engine.speed(),
            font_size: self.font_size,
            word_spacing: self.word_spacing,
        }
    }

    fn save_settings(&self) {
        if let Some(persister) = &self.persister {
            persister.save(self.settings_snapshot());
        }
    }

    pub fn set_warnings(&mut self, warnings: Vec<String>) {
        self.show_warnings = !warnings.is_empty();
        self.warnings = warnings;
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn warnings_visible(&self) -> bool {
        self.show_warnings
    }

    pub fn dismiss_warnings(&mut self) {
        self.show_warnings = false;
    }

    /// Stop the engine, then flush preferences
    pub async fn shutdown(&self) -> autocue_core::Result<()> {
        self.engine.stop().await;
        match &self.persister {
            Some(persister) => persister.close().await,
            None => Ok(()),
        }
    }
}
