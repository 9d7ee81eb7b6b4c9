//! Bot info response types.

use serde::{Deserialize, Serialize};

/// Identity of the bot attached to an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    /// Display name of the bot.
    #[serde(default, alias = "app_name", skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,
    /// Open id of the bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id: Option<String>,
    /// Avatar image of the bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Activation state reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate_status: Option<i64>,
}

impl BotIdentity {
    /// Creates a new identity with the given name and open id.
    pub fn new(bot_name: impl Into<String>, open_id: impl Into<String>) -> Self {
        Self {
            bot_name: Some(bot_name.into()),
            open_id: Some(open_id.into()),
            ..Default::default()
        }
    }
}

/// Envelope nesting the bot identity under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfoData {
    /// The bot identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotIdentity>,
}

/// Response of the bot info endpoint.
///
/// The platform places the bot identity either at the top level (`bot`) or
/// under `data.bot`. Both shapes are modelled here and [`BotInfoResponse::bot`]
/// picks whichever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfoResponse {
    /// Result code; `0` means success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Result message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Bot identity at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotIdentity>,
    /// Bot identity nested under `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BotInfoData>,
}

impl BotInfoResponse {
    /// Creates a successful response carrying the bot at the top level.
    pub fn success(bot: BotIdentity) -> Self {
        Self {
            code: Some(0),
            msg: Some("ok".to_owned()),
            bot: Some(bot),
            data: None,
        }
    }

    /// Creates a successful response carrying the bot under `data`.
    pub fn success_nested(bot: BotIdentity) -> Self {
        Self {
            code: Some(0),
            msg: Some("ok".to_owned()),
            bot: None,
            data: Some(BotInfoData { bot: Some(bot) }),
        }
    }

    /// Creates an error response.
    pub fn error(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            msg: Some(msg.into()),
            bot: None,
            data: None,
        }
    }

    /// Returns whether the platform reported success.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns the bot identity from whichever location carries it.
    pub fn bot(&self) -> Option<&BotIdentity> {
        self.bot
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|data| data.bot.as_ref()))
    }

    /// Formats the platform error as shown to users.
    ///
    /// Uses the message when it is non-empty, the code otherwise.
    pub fn api_error(&self) -> String {
        match self.msg.as_deref().filter(|msg| !msg.is_empty()) {
            Some(msg) => format!("API error: {msg}"),
            None => match self.code {
                Some(code) => format!("API error: code {code}"),
                None => "API error: code unknown".to_owned(),
            },
        }
    }
}
