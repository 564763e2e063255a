use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

/// Downloads remote CSV documents for URL scans.
#[derive(Clone)]
pub struct CsvFetcher {
    client: Client,
    max_body_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("response body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl CsvFetcher {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// GET `url` and return the body. Only http(s) URLs are followed, any
    /// non-2xx status is an error, and the body is read in chunks so an
    /// oversized response is abandoned once it passes `max_body_bytes`.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl(url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_owned()));
        }

        let mut response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
