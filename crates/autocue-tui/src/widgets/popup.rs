use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Warnings listed before the rest is summarized
const MAX_VISIBLE_WARNINGS: usize = 4;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the startup warnings (ignored or clamped preferences)
    pub fn render_warnings(frame: &mut Frame, warnings: &[String], theme: &Theme) {
        let area = frame.area();

        let popup_width = 60u16.min(area.width.saturating_sub(4));
        let popup_height = 9u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Configuration warning ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning))
            .style(Style::default().bg(theme.status_bg));

        let mut lines = vec![Line::from(Span::styled(
            "Some preferences were ignored:",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(summarize(warnings).into_iter().map(|warning| {
            Line::from(Span::styled(
                format!("- {}", warning),
                Style::default().fg(theme.text),
            ))
        }));
        lines.push(Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

fn summarize(warnings: &[String]) -> Vec<String> {
    let mut visible: Vec<String> = warnings.iter().take(MAX_VISIBLE_WARNINGS).cloned().collect();
    if warnings.len() > MAX_VISIBLE_WARNINGS {
        visible.push(format!(
            "... and {} more",
            warnings.len() - MAX_VISIBLE_WARNINGS
        ));
    }
    visible
}

/// Helper function to create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_truncates() {
        let warnings: Vec<String> = (0..6).map(|i| format!("warning {}", i)).collect();
        let visible = summarize(&warnings);
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[4], "... and 2 more");

        let few = vec!["only one".to_string()];
        assert_eq!(summarize(&few), few);
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 3, 10, 4));
    }
}
