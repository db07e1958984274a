mod filter_pills;
mod statusbar;
mod todo_list;

pub use filter_pills::render_filter_pills;
pub use statusbar::render_statusbar;
pub use todo_list::render_todo_list;
