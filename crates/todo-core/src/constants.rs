//! Application-wide constants
//!
//! Pagination shape of the remote todo source and the timing knobs shared
//! by the cache, the session and the terminal front end.

use std::time::Duration;

/// Default todo API base URL
pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Items requested per page (`_limit`)
pub const PAGE_SIZE: u32 = 10;

/// Total number of items exposed by the remote source
pub const TOTAL_ITEMS: u32 = 200;

/// Number of navigable pages
pub const TOTAL_PAGES: u32 = TOTAL_ITEMS.div_ceil(PAGE_SIZE);

/// First page number (pages are 1-indexed)
pub const FIRST_PAGE: u32 = 1;

/// A loaded page younger than this is served from cache without refetching
pub const STALE_AFTER: Duration = Duration::from_secs(30);

/// Default per-request timeout for the HTTP page source
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How long the "adding" affordance stays up after a successful add
pub const ADDING_FLASH: Duration = Duration::from_millis(220);

/// Owner id given to locally created todos
pub const LOCAL_OWNER_ID: u64 = 0;

/// Error message for any non-success HTTP response
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch todos";

/// Failure headline when the network looks unreachable
pub const OFFLINE_HEADLINE: &str =
    "You appear to be offline. Check your internet connection and try again.";

/// Failure headline for every other fetch error
pub const GENERIC_HEADLINE: &str = "Could not load todos.";
