pub mod filter;
pub mod todo;

pub use filter::Filter;
pub use todo::Todo;
