use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use todo_core::projection::{DashboardView, LoadState};
use todo_core::Todo;
use unicode_width::UnicodeWidthStr;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::layout::SKELETON_ROWS;
use crate::ui::theme;

/// Render the list card: record counters, then the list or whichever
/// loading/error/empty state applies.
pub fn render_todo_list(f: &mut Frame, view: &DashboardView, selected: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_inactive());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(inner);
    render_counters(f, view, chunks[0]);

    match &view.load {
        LoadState::Loading => render_loading(f, chunks[1]),
        LoadState::Failed { headline, detail } => {
            render_failure(f, headline, detail, view.can_retry, chunks[1])
        }
        LoadState::Ready if view.todos.displayed.is_empty() => {
            f.render_widget(
                Paragraph::new(" No todos match this filter on this page.").style(theme::text_muted()),
                chunks[1],
            );
        }
        LoadState::Ready => render_rows(f, &view.todos.displayed, selected, chunks[1]),
    }
}

fn render_counters(f: &mut Frame, view: &DashboardView, area: Rect) {
    let halves = Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).split(area);

    let showing = Line::from(vec![
        Span::styled(" Showing ", theme::text_muted()),
        Span::styled(view.todos.displayed.len().to_string(), theme::text_bold()),
        Span::styled(" of ", theme::text_muted()),
        Span::styled(view.todos.total_for_page.to_string(), theme::text_bold()),
        Span::styled(" records", theme::text_muted()),
    ]);
    f.render_widget(Paragraph::new(showing), halves[0]);

    let sync = if view.syncing {
        Span::styled("Syncing…", theme::status_warning())
    } else if view.refresh_error.is_some() {
        Span::styled("Refresh failed", theme::status_error())
    } else {
        Span::styled("Up to date", theme::status_success())
    };
    f.render_widget(Paragraph::new(Line::from(sync)), halves[1]);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(" Loading todos…", theme::text_muted())),
        Line::from(""),
    ];
    for index in 0..SKELETON_ROWS {
        let width = 18 + (index * 7) % 14;
        lines.push(Line::from(vec![
            Span::styled(" [ ] ", theme::text_dim()),
            Span::styled("░".repeat(width), theme::text_dim()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_failure(f: &mut Frame, headline: &str, detail: &str, can_retry: bool, area: Rect) {
    let retry_style = if can_retry {
        theme::text_bold()
    } else {
        theme::text_dim()
    };
    let lines = vec![
        Line::from(Span::styled(format!(" {}", headline), theme::status_error())),
        Line::from(Span::styled(format!(" {}", detail), theme::text_muted())),
        Line::from(""),
        Line::from(Span::styled(" [r] Retry", retry_style)),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn todo_item(todo: &Todo, width: usize) -> ListItem<'static> {
    let (checkbox, chip, chip_style, title_style) = if todo.completed {
        ("[✓] ", "Completed", theme::todo_done(), theme::todo_done_title())
    } else {
        ("[ ] ", "Open", theme::todo_open(), theme::text_primary())
    };

    let title_width = width.saturating_sub(checkbox.width() + chip.len() + 3);
    let title = truncate_with_ellipsis(&todo.title, title_width);
    let padding = title_width.saturating_sub(title.width());

    let main = Line::from(vec![
        Span::styled(format!(" {}", checkbox), chip_style),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(padding + 1)),
        Span::styled(chip, chip_style),
    ]);
    let meta = Line::from(Span::styled(
        format!("     Source id #{} · user {}", todo.id, todo.owner_id),
        theme::text_dim(),
    ));

    ListItem::new(Text::from(vec![main, meta]))
}

fn render_rows(f: &mut Frame, todos: &[Todo], selected: usize, area: Rect) {
    let width = area.width as usize;
    let items: Vec<ListItem> = todos.iter().map(|todo| todo_item(todo, width)).collect();

    let list = List::new(items).highlight_style(theme::row_selected());
    let mut state = ListState::default().with_selected(Some(selected.min(todos.len().saturating_sub(1))));
    f.render_stateful_widget(list, area, &mut state);
}
