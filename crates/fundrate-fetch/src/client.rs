//! HTTP transport.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{FetchError, FetchResult};

/// A blocking GET returning the response body as text.
pub trait HttpClient {
    /// Fetches `url`, failing on transport errors and non-success statuses.
    fn get_text(&self, url: &str) -> FetchResult<String>;
}

/// [`HttpClient`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Builds a client sending a browser user agent, which both sources
    /// require to serve data.
    pub fn new() -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
            ),
        );
        let inner = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::http("<client>", e))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get_text(&self, url: &str) -> FetchResult<String> {
        debug!(url, "GET");
        let response = self
            .inner
            .get(url)
            .send()
            .map_err(|e| FetchError::http(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::http(url, e))
    }
}
