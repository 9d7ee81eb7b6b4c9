//! Probe outcome type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BotIdentity, ServiceHealth};

/// Error reported for probes attempted without an app id or app secret.
pub const MISSING_CREDENTIALS: &str = "missing credentials (appId, appSecret)";

/// Outcome of one probe against a bot account.
///
/// Both variants share one wire shape, discriminated by `ok`:
///
/// ```json
/// {"ok":true,"appId":"cli_abc","botName":"Bot","botOpenId":"ou_1"}
/// {"ok":false,"appId":"cli_abc","error":"API error: app not found"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ProbeResultRepr", try_from = "ProbeResultRepr")]
pub enum ProbeResult {
    /// The platform answered and the app is configured.
    Ok {
        app_id: String,
        bot_name: Option<String>,
        bot_open_id: Option<String>,
    },
    /// The probe did not succeed.
    ///
    /// `app_id` is absent only when no credentials were supplied.
    Failed {
        app_id: Option<String>,
        error: String,
    },
}

impl ProbeResult {
    /// Creates a successful outcome from the bot identity, if any.
    pub fn ok(app_id: impl Into<String>, bot: Option<&BotIdentity>) -> Self {
        Self::Ok {
            app_id: app_id.into(),
            bot_name: bot.and_then(|bot| bot.bot_name.clone()),
            bot_open_id: bot.and_then(|bot| bot.open_id.clone()),
        }
    }

    /// Creates a failed outcome for a known app.
    pub fn failed(app_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            app_id: Some(app_id.into()),
            error: error.into(),
        }
    }

    /// Creates the outcome reported when credentials are absent or incomplete.
    pub fn missing_credentials() -> Self {
        Self::Failed {
            app_id: None,
            error: MISSING_CREDENTIALS.to_owned(),
        }
    }

    /// Returns whether the probe succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns the app id the probe was made for.
    pub fn app_id(&self) -> Option<&str> {
        match self {
            Self::Ok { app_id, .. } => Some(app_id),
            Self::Failed { app_id, .. } => app_id.as_deref(),
        }
    }

    /// Returns the error of a failed probe.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Summarizes this outcome as a health report.
    pub fn to_health(&self) -> ServiceHealth {
        match self {
            Self::Ok { bot_name, .. } => {
                let health = ServiceHealth::healthy();
                match bot_name {
                    Some(name) => health.with_message(format!("bot {name} reachable")),
                    None => health,
                }
            }
            Self::Failed { error, .. } => ServiceHealth::unhealthy(error.clone()),
        }
    }
}

/// Error returned when decoding a malformed probe outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProbeResult {
    /// A successful outcome without an app id.
    #[error("successful probe result is missing `appId`")]
    MissingAppId,
    /// A failed outcome without an error.
    #[error("failed probe result is missing `error`")]
    MissingError,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProbeResultRepr {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bot_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bot_open_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ProbeResult> for ProbeResultRepr {
    fn from(result: ProbeResult) -> Self {
        match result {
            ProbeResult::Ok {
                app_id,
                bot_name,
                bot_open_id,
            } => Self {
                ok: true,
                app_id: Some(app_id),
                bot_name,
                bot_open_id,
                error: None,
            },
            ProbeResult::Failed { app_id, error } => Self {
                ok: false,
                app_id,
                bot_name: None,
                bot_open_id: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<ProbeResultRepr> for ProbeResult {
    type Error = InvalidProbeResult;

    fn try_from(repr: ProbeResultRepr) -> Result<Self, Self::Error> {
        if repr.ok {
            let app_id = repr.app_id.ok_or(InvalidProbeResult::MissingAppId)?;
            Ok(Self::Ok {
                app_id,
                bot_name: repr.bot_name,
                bot_open_id: repr.bot_open_id,
            })
        } else {
            let error = repr.error.ok_or(InvalidProbeResult::MissingError)?;
            Ok(Self::Failed {
                app_id: repr.app_id,
                error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ServiceStatus;

    #[test]
    fn test_ok_serialization() {
        let result = ProbeResult::ok("cli_abc", Some(&BotIdentity::new("Bot", "ou_1")));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"ok": true, "appId": "cli_abc", "botName": "Bot", "botOpenId": "ou_1"})
        );
    }

    #[test]
    fn test_ok_without_bot_omits_fields() {
        let result = ProbeResult::ok("cli_abc", None);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"ok": true, "appId": "cli_abc"}));
    }

    #[test]
    fn test_missing_credentials_serialization() {
        let value = serde_json::to_value(ProbeResult::missing_credentials()).unwrap();
        assert_eq!(
            value,
            json!({"ok": false, "error": "missing credentials (appId, appSecret)"})
        );
    }

    #[test]
    fn test_deserialize_failed() {
        let result: ProbeResult =
            serde_json::from_value(json!({"ok": false, "appId": "cli_abc", "error": "ECONNRESET"}))
                .unwrap();
        assert_eq!(result, ProbeResult::failed("cli_abc", "ECONNRESET"));
        assert_eq!(result.error(), Some("ECONNRESET"));
        assert_eq!(result.app_id(), Some("cli_abc"));
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_shapes() {
        assert!(serde_json::from_value::<ProbeResult>(json!({"ok": true})).is_err());
        assert!(
            serde_json::from_value::<ProbeResult>(json!({"ok": false, "appId": "cli_abc"}))
                .is_err()
        );
    }

    #[test]
    fn test_to_health() {
        let healthy = ProbeResult::ok("cli_abc", Some(&BotIdentity::new("Bot", "ou_1")));
        let health = healthy.to_health();
        assert_eq!(health.status, ServiceStatus::Healthy);
        assert_eq!(health.message.as_deref(), Some("bot Bot reachable"));

        let health = ProbeResult::failed("cli_abc", "ECONNRESET").to_health();
        assert_eq!(health.status, ServiceStatus::Unhealthy);
        assert_eq!(health.message.as_deref(), Some("ECONNRESET"));
    }
}
