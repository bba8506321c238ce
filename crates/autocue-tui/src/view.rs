use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;
use crate::widgets::{PopupWidget, PrompterWidget, StatusBarWidget};

/// Draw one full frame: prompter, optional status bar, warning popup on top
pub fn draw(frame: &mut Frame, app: &mut App, theme: &Theme, show_status_bar: bool) {
    let size = frame.area();

    if show_status_bar {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);

        PrompterWidget::render(frame, main_layout[0], app, theme);
        StatusBarWidget::render(frame, main_layout[1], app, theme);
    } else {
        PrompterWidget::render(frame, size, app, theme);
    }

    if app.warnings_visible() {
        PopupWidget::render_warnings(frame, app.warnings(), theme);
    }
}
