use anyhow::{Context, Result};

use crate::config::CoreConfig;
use crate::constants::PAGE_SIZE;
use crate::error::FetchError;
use crate::fetch::PageSource;
use crate::models::Todo;

/// reqwest-backed page source for `GET {base}/todos?_page=N&_limit=10`
#[derive(Clone)]
pub struct HttpPageSource {
    api_base: String,
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(config: &CoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("todo-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            api_base: config.api_base.clone(),
            client,
        })
    }

    fn request(&self, page: u32) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/todos", self.api_base))
            .query(&[("_page", page), ("_limit", PAGE_SIZE)])
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Todo>, FetchError> {
        let response = self.request(page).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::status(response.status().as_u16()));
        }

        let todos = response.json::<Vec<Todo>>().await?;
        Ok(todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_page_and_limit() {
        let source = HttpPageSource::new(&CoreConfig::new("http://localhost:3000/")).unwrap();
        let request = source.request(3).build().unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/todos?_page=3&_limit=10"
        );
    }
}
