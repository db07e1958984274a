// Centralized theme for the dashboard
// All colors and styles are defined here - edit this file to change the look

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// App background - pure black for contrast
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected row background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Input field background
pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

/// Active filter pill background
pub const BG_PILL_ACTIVE: Color = Color::Rgb(28, 28, 32);

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLE FUNCTIONS
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn text_bold() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn border_active() -> Style {
    Style::default().fg(BORDER_ACTIVE)
}

pub fn border_inactive() -> Style {
    Style::default().fg(BORDER_INACTIVE)
}

pub fn status_success() -> Style {
    Style::default().fg(ACCENT_SUCCESS)
}

pub fn status_warning() -> Style {
    Style::default().fg(ACCENT_WARNING)
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn input_active() -> Style {
    Style::default().fg(TEXT_PRIMARY).bg(BG_INPUT)
}

pub fn input_placeholder() -> Style {
    Style::default().fg(TEXT_DIM).bg(BG_INPUT)
}

pub fn pill_active() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .bg(BG_PILL_ACTIVE)
        .add_modifier(Modifier::BOLD)
}

pub fn pill_inactive() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn row_selected() -> Style {
    Style::default().bg(BG_SELECTED)
}

pub fn todo_done() -> Style {
    Style::default().fg(ACCENT_SUCCESS)
}

pub fn todo_open() -> Style {
    Style::default().fg(ACCENT_WARNING)
}

pub fn todo_done_title() -> Style {
    Style::default()
        .fg(TEXT_MUTED)
        .add_modifier(Modifier::CROSSED_OUT)
}
