use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::App;

pub(crate) fn render(f: &mut Frame, app: &App) {
    // Fill entire frame with app background (pure black)
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    ui::views::render_dashboard(f, app, chunks[0]);
    render_statusbar(f, app, chunks[1]);
}
