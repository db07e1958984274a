mod http;

pub use http::HttpPageSource;

use std::future::Future;

use crate::error::FetchError;
use crate::models::Todo;

/// Anything that can produce one page of todos.
pub trait PageSource: Send + Sync + 'static {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<Vec<Todo>, FetchError>> + Send;
}
