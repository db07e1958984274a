// Global status bar at the very bottom of the app
// Shows the last status message, otherwise the key hints for the current mode

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::theme;
use crate::ui::{App, InputMode};

const NORMAL_HINTS: &str =
    "←/→ page  ↑/↓ select  space toggle  a add  f/1-3 filter  r retry  q quit";
const EDITING_HINTS: &str = "enter add  esc cancel";

pub fn render_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let line = if app.pending_quit {
        Line::from(Span::styled(
            truncate_with_ellipsis(" Press Ctrl+C again to quit", width),
            theme::status_error(),
        ))
    } else if let Some(msg) = &app.status_message {
        Line::from(Span::styled(
            truncate_with_ellipsis(&format!(" {}", msg), width),
            theme::status_warning(),
        ))
    } else {
        let hints = match app.input_mode {
            InputMode::Normal => NORMAL_HINTS,
            InputMode::Editing => EDITING_HINTS,
        };
        Line::from(Span::styled(
            truncate_with_ellipsis(&format!(" {}", hints), width),
            theme::text_dim(),
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}
