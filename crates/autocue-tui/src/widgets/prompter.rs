use std::ops::Range;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

const EMPTY_MESSAGE: &str = "Open a Markdown, HTML or text file to start: autocue <FILE>";

/// Height of the clear band the presenter reads from
const READING_BAND_ROWS: u16 = 3;
/// Columns kept free on each side of the text for the chevrons
const CHEVRON_GUTTER: u16 = 2;

/// Viewport rows that form the reading band, centered vertically
pub fn reading_band(height: u16) -> Range<u16> {
    let band = READING_BAND_ROWS.min(height);
    let start = (height - band) / 2;
    start..start + band
}

pub struct PrompterWidget;

impl PrompterWidget {
    /// Render the visible slice of the script as a centered column.
    ///
    /// Rows outside the reading band are dimmed and the middle of the band is
    /// marked with `>` and `<` on either side of the column.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
        let inner_width = area.width.saturating_sub(2 * CHEVRON_GUTTER);
        app.set_viewport(inner_width, area.height);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        if app.document_name().is_none() {
            let hint = Paragraph::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().fg(theme.muted),
            )))
            .alignment(Alignment::Center);
            let middle = Rect {
                y: area.y + area.height / 2,
                height: area.height.min(1),
                ..area
            };
            frame.render_widget(hint, middle);
            return;
        }

        let column = app.column_width().min(inner_width);
        let column_area = Rect {
            x: area.x + CHEVRON_GUTTER.min(area.width) + (inner_width - column) / 2,
            width: column,
            ..area
        };

        let band = reading_band(area.height);
        let text_style = Style::default().fg(theme.text).bg(theme.background);
        let faded_style = Style::default().fg(theme.muted).bg(theme.background);

        let lines: Vec<Line> = app
            .visible_rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let in_band = u16::try_from(idx).is_ok_and(|idx| band.contains(&idx));
                let mut style = if in_band { text_style } else { faded_style };
                if row.heading {
                    style = style.add_modifier(Modifier::BOLD);
                    if in_band {
                        style = style.fg(theme.heading);
                    }
                }
                Line::from(Span::styled(row.text.clone(), style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), column_area);

        if band.is_empty() || inner_width == 0 {
            return;
        }
        let marker_y = area.y + band.start + (band.end - band.start) / 2;
        let marker_style = Style::default()
            .fg(theme.accent)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD);
        let left = Rect::new(column_area.x - CHEVRON_GUTTER, marker_y, 1, 1);
        let right = Rect::new(column_area.x + column_area.width + 1, marker_y, 1, 1);
        frame.render_widget(Paragraph::new(Span::styled(">", marker_style)), left);
        frame.render_widget(Paragraph::new(Span::styled("<", marker_style)), right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Document, Preferences};
    use autocue_core::content::Format;
    use autocue_core::ScrollEngine;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn fg_at(terminal: &Terminal<TestBackend>, x: u16, y: u16) -> Color {
        terminal.backend().buffer()[(x, y)].fg
    }

    #[tokio::test]
    async fn test_renders_visible_rows() {
        let mut app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());
        app.load_document(Document {
            name: "talk.txt".to_string(),
            text: "hello world\nsecond line".to_string(),
            format: Format::Text,
        });

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                PrompterWidget::render(frame, area, &mut app, &Theme::default());
            })
            .unwrap();

        let content = screen(&terminal);
        assert!(content.contains("hello world"));
        assert!(content.contains("second line"));

        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_reading_band_markers_and_fading() {
        let mut app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());
        app.load_document(Document {
            name: "talk.txt".to_string(),
            text: (0..10).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n"),
            format: Format::Text,
        });
        let theme = Theme::default();

        let mut terminal = Terminal::new(TestBackend::new(40, 7)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                PrompterWidget::render(frame, area, &mut app, &theme);
            })
            .unwrap();

        // Band covers rows 2..5 of 7; markers sit on its middle row
        assert_eq!(reading_band(7), 2..5);
        let marker_row = row_text(&terminal, 3);
        let text_x = marker_row.find("line 3").unwrap();
        let left = marker_row.find('>').unwrap();
        let right = marker_row.find('<').unwrap();
        assert!(left < text_x && right > text_x);
        assert_eq!(fg_at(&terminal, left as u16, 3), theme.accent);
        assert_eq!(fg_at(&terminal, right as u16, 3), theme.accent);

        let text_x = text_x as u16;
        assert_eq!(fg_at(&terminal, text_x, 2), theme.text);
        assert_eq!(fg_at(&terminal, text_x, 3), theme.text);
        assert_eq!(fg_at(&terminal, text_x, 4), theme.text);
        assert_eq!(fg_at(&terminal, text_x, 0), theme.muted);
        assert_eq!(fg_at(&terminal, text_x, 6), theme.muted);

        assert!(!row_text(&terminal, 0).contains('>'));
        assert!(!row_text(&terminal, 6).contains('<'));

        app.shutdown().await.unwrap();
    }

    #[test]
    fn test_reading_band_small_viewports() {
        assert_eq!(reading_band(0), 0..0);
        assert_eq!(reading_band(2), 0..2);
        assert_eq!(reading_band(20), 8..11);
    }

    #[tokio::test]
    async fn test_renders_hint_without_document() {
        let mut app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());

        let mut terminal = Terminal::new(TestBackend::new(80, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                PrompterWidget::render(frame, area, &mut app, &Theme::default());
            })
            .unwrap();

        assert!(screen(&terminal).contains("autocue <FILE>"));
        app.shutdown().await.unwrap();
    }
}
