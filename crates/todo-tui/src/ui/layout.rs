// Layout constants for the dashboard chrome

/// Horizontal padding for content areas
pub const CONTENT_PADDING_H: u16 = 2;

/// Title + page indicator + filter pills
pub const HEADER_HEIGHT: u16 = 2;

/// Bordered input plus one line for the hint or validation error
pub const ADD_FORM_HEIGHT: u16 = 4;

/// Pagination controls
pub const FOOTER_HEIGHT: u16 = 1;

/// Status bar height (single line at very bottom of app)
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Placeholder rows shown while a page is loading
pub const SKELETON_ROWS: usize = 4;
