use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::HELP_HINT;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let (state, state_color) = if app.is_playing() {
            (" PLAYING ", theme.accent)
        } else {
            (" PAUSED ", theme.warning)
        };

        let details = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None => format!(
                " {} | {:.0} px/s | {:.0} pt | spacing x{} | {}% ",
                app.document_name().unwrap_or("No file loaded"),
                app.speed(),
                app.font_size(),
                app.word_spacing(),
                app.progress(),
            ),
        };

        let used = state.width() + details.width() + HELP_HINT.width();
        let padding = usize::from(area.width).saturating_sub(used);

        let bar = Style::default().bg(theme.status_bg);
        let line = Line::from(vec![
            Span::styled(
                state,
                bar.fg(state_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(details, bar.fg(theme.text)),
            Span::styled(" ".repeat(padding), bar),
            Span::styled(HELP_HINT, bar.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
