//! Structured error handling for bot-platform operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source error in [`Error`], so any transport-level failure can be
/// carried along without leaking the concrete client type into this crate.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while talking to the bot platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Network-related error occurred.
    NetworkError,
    /// Authentication failed.
    Authentication,
    /// The remote answered with an unexpected status.
    ExternalError,
    /// Configuration error.
    Configuration,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

/// Structured error type with classification and an optional source.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a new external error.
    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable reason for this error.
    ///
    /// This is the message when one was attached, otherwise the source's
    /// display text, otherwise the kind name.
    pub fn reason(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }

        match &self.source {
            Some(source) => source.to_string(),
            None => self.kind.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        let message = error.to_string();
        Self::from_source(ErrorKind::Serialization, error).with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_error_display() {
        let error = Error::network_error().with_message("ECONNRESET");

        let display_str = error.to_string();
        assert_eq!(display_str, "[network_error]: ECONNRESET");
    }

    #[test]
    fn test_reason_prefers_message() {
        let error = Error::from_source(ErrorKind::NetworkError, std::io::Error::other("io"))
            .with_message("ECONNRESET");
        assert_eq!(error.reason(), "ECONNRESET");
    }

    #[test]
    fn test_reason_falls_back_to_source_then_kind() {
        let error = Error::from_source(ErrorKind::NetworkError, std::io::Error::other("reset"));
        assert_eq!(error.reason(), "reset");

        let error = Error::timeout();
        assert_eq!(error.reason(), "timeout");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(serde_error);

        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.message.is_some());
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert_eq!(
            ErrorKind::from_str("network_error").unwrap(),
            ErrorKind::NetworkError
        );
        assert!(ErrorKind::from_str("invalid").is_err());
    }
}
