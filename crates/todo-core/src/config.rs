use std::time::Duration;

use crate::constants::{DEFAULT_API_BASE, REQUEST_TIMEOUT, STALE_AFTER};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Base URL of the todo API, without the `/todos` path
    pub api_base: String,
    /// Staleness window for loaded pages
    pub stale_after: Duration,
    pub request_timeout: Duration,
}

impl CoreConfig {
    pub fn new<S: Into<String>>(api_base: S) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            stale_after: STALE_AFTER,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
