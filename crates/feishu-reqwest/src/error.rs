//! Error types for the reqwest-based open platform client.

use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// Token endpoint reported success without a token.
    #[error("tenant access token missing from response")]
    MissingToken,
    /// Non-success HTTP status with a body that is not a platform response.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },
}

impl From<Error> for feishu_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    feishu_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    feishu_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    feishu_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    feishu_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => feishu_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => feishu_core::Error::configuration()
                .with_message(format!("invalid open platform URL: {e}"))
                .with_source(e),
            Error::MissingToken => feishu_core::Error::serialization()
                .with_message("tenant access token missing from response"),
            Error::HttpStatus { status } => {
                let error = match status {
                    401 | 403 => feishu_core::Error::authentication(),
                    _ => feishu_core::Error::external_error(),
                };
                error.with_message(format!("unexpected HTTP status {status}"))
            }
        }
    }
}
