use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use todo_core::Filter;

use crate::ui::theme;

/// Three mutually exclusive filter pills, right-aligned.
pub fn render_filter_pills(f: &mut Frame, active: Filter, area: Rect) {
    let mut spans = Vec::with_capacity(Filter::ALL.len() * 2);
    for (index, filter) in Filter::ALL.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if *filter == active {
            theme::pill_active()
        } else {
            theme::pill_inactive()
        };
        spans.push(Span::styled(
            format!(" {} {} ", index + 1, filter.label()),
            style,
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
