//! Best-effort shortening of build-status URLs.

use async_trait::async_trait;

use crate::error::ShortenError;

/// Turns a long build-status URL into something that fits in a text message.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError>;
}

/// Default TinyURL endpoint.
const DEFAULT_API_BASE: &str = "http://tinyurl.com";

/// Shortener backed by the tinyurl.com create API.
pub struct TinyUrlShortener {
    api_base: String,
    client: reqwest::Client,
}

impl TinyUrlShortener {
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Point the shortener at a different endpoint, used by tests.
    #[must_use]
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for TinyUrlShortener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlShortener for TinyUrlShortener {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let request_url = format!(
            "{}/api-create.php?url={}",
            self.api_base,
            url.replace(' ', "%20")
        );

        let response = self.client.get(&request_url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(ShortenError::Status(status.as_u16()))
        }
    }
}
