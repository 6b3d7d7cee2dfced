#[cfg(test)]
use std::collections::HashMap;
use std::future::Future;

use tracing::debug;

use crate::error::FetchError;

/// Anything that can turn a URL into page HTML.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Plain GET with library defaults: no retries, no custom headers.
#[derive(Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Serves canned pages from memory.
#[cfg(test)]
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }
}

#[cfg(test)]
impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
