use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use todo_core::constants::PAGE_SIZE;
use todo_core::projection::DashboardView;

use crate::ui::components::{render_filter_pills, render_todo_list};
use crate::ui::layout;
use crate::ui::theme;
use crate::ui::{App, InputMode};

const ADD_HINT: &str = "New todos are kept only on this device and are not sent to the API.";
const ADD_PLACEHOLDER: &str = "Add a todo for this page…";

pub fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let padded = Rect {
        x: area.x + layout::CONTENT_PADDING_H,
        width: area.width.saturating_sub(layout::CONTENT_PADDING_H * 2),
        ..area
    };

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Length(layout::ADD_FORM_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
    ])
    .split(padded);

    render_header(f, &view, chunks[0]);
    render_add_form(f, &view, app.input_mode, chunks[1]);
    render_todo_list(f, &view, app.selected_index, chunks[2]);
    render_pagination(f, &view, chunks[3]);
}

fn render_header(f: &mut Frame, view: &DashboardView, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    let mut title = vec![Span::styled("Todo Dashboard", theme::title())];
    if view.has_override {
        title.push(Span::styled("  · edited locally", theme::text_dim()));
    }
    f.render_widget(Paragraph::new(Line::from(title)), rows[0]);

    let halves = Layout::horizontal([Constraint::Min(0), Constraint::Length(36)]).split(rows[1]);
    let dot = if view.load.is_failed() {
        theme::status_error()
    } else {
        theme::status_success()
    };
    let page = Line::from(vec![
        Span::styled("● ", dot),
        Span::styled("Page ", theme::text_muted()),
        Span::styled(view.page.to_string(), theme::text_bold()),
        Span::styled(" of ", theme::text_muted()),
        Span::styled(view.total_pages.to_string(), theme::text_bold()),
    ]);
    f.render_widget(Paragraph::new(page), halves[0]);
    render_filter_pills(f, view.filter, halves[1]);
}

fn render_add_form(f: &mut Frame, view: &DashboardView, mode: InputMode, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area);

    let editing = mode == InputMode::Editing;
    let border = if editing {
        theme::border_active()
    } else {
        theme::border_inactive()
    };
    let button_style = if view.can_submit {
        theme::text_bold()
    } else {
        theme::text_dim()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title_bottom(Line::from(Span::styled(" + Add Todo ", button_style)).right_aligned());

    let input = if view.draft.is_empty() && !editing {
        Paragraph::new(ADD_PLACEHOLDER).style(theme::input_placeholder())
    } else {
        let cursor = if editing { "▏" } else { "" };
        Paragraph::new(format!("{}{}", view.draft, cursor)).style(theme::input_active())
    };
    f.render_widget(input.block(block), rows[0]);

    let below = match &view.input_error {
        Some(err) => Span::styled(err.as_str(), theme::status_error()),
        None => Span::styled(ADD_HINT, theme::text_dim()),
    };
    f.render_widget(Paragraph::new(Line::from(below)), rows[1]);
}

fn render_pagination(f: &mut Frame, view: &DashboardView, area: Rect) {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled {
            theme::text_primary()
        } else {
            theme::text_dim()
        };
        Span::styled(label, style)
    };

    let controls = Line::from(vec![
        control("← Prev", view.can_prev),
        Span::styled("   Page ", theme::text_muted()),
        Span::styled(view.page.to_string(), theme::text_bold()),
        Span::styled(format!(" / {}   ", view.total_pages), theme::text_muted()),
        control("Next →", view.can_next),
    ]);
    f.render_widget(Paragraph::new(controls), area);
    f.render_widget(
        Paragraph::new(format!("Page size: {}", PAGE_SIZE))
            .style(theme::text_muted())
            .alignment(Alignment::Right),
        area,
    );
}
