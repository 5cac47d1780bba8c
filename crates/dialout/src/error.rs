//! Error types for the notification collaborators.

use thiserror::Error;

/// Errors from the telephony provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request never completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Errors from the URL-shortening service.
#[derive(Debug, Error)]
pub enum ShortenError {
    /// The HTTP request never completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-OK status.
    #[error("shortener returned status {0}")]
    Status(u16),
}
