//! Health reporting types.
//!
//! A [`ServiceHealth`] is the dashboard-facing summary of a probe: the bot is
//! either reachable and configured ([`ServiceStatus::Healthy`]) or it is not.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents the operational status of a bot account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// The account answered the probe successfully.
    #[default]
    Healthy,
    /// The account could not be probed or the platform rejected it.
    Unhealthy,
}

/// Health information for a bot account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Current status.
    pub status: ServiceStatus,
    /// Optional message describing the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp when the report was produced.
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    /// Creates a new healthy report.
    pub fn healthy() -> Self {
        Self {
            status: ServiceStatus::Healthy,
            message: None,
            checked_at: Timestamp::now(),
        }
    }

    /// Creates a new unhealthy report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            message: Some(message.into()),
            checked_at: Timestamp::now(),
        }
    }

    /// Sets the message of this report.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns whether the status is healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy() {
        let health = ServiceHealth::healthy();
        assert!(health.is_healthy());
        assert!(health.message.is_none());
    }

    #[test]
    fn test_unhealthy() {
        let health = ServiceHealth::unhealthy("API error: app not found");
        assert_eq!(health.status, ServiceStatus::Unhealthy);
        assert_eq!(health.message.as_deref(), Some("API error: app not found"));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ServiceStatus::Unhealthy).unwrap();
        assert_eq!(json, "\"unhealthy\"");
    }
}
