pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod models;
pub mod mutations;
pub mod navigation;
pub mod projection;
pub mod runtime;
pub mod session;
pub mod store;
pub mod tracing_setup;

pub use error::{FetchError, ValidationError};
pub use models::{Filter, Todo};
pub use session::{Action, DashboardSession, Effect};
