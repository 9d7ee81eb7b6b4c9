//! Bot account credentials.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Open platform host serving an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeishuDomain {
    /// Mainland China open platform.
    #[default]
    Feishu,
    /// International (Lark) open platform.
    Lark,
}

impl FeishuDomain {
    /// Returns the base URL of the open platform API.
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Feishu => "https://open.feishu.cn",
            Self::Lark => "https://open.larksuite.com",
        }
    }
}

/// Credentials identifying one bot account on the open platform.
///
/// The application id and secret are required for a probe to be attempted.
/// The account id is optional and, when set, is used instead of the app id
/// to key cached probe outcomes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotCredentials {
    /// Application identifier (`cli_...`).
    #[serde(default)]
    pub app_id: String,
    /// Application secret.
    #[serde(default)]
    pub app_secret: String,
    /// Optional account identifier overriding the cache key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Open platform host.
    #[serde(default)]
    pub domain: FeishuDomain,
}

impl BotCredentials {
    /// Creates new credentials for the default domain.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            account_id: None,
            domain: FeishuDomain::default(),
        }
    }

    /// Sets the account identifier.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Sets the open platform host.
    pub fn with_domain(mut self, domain: FeishuDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Returns whether both the app id and the app secret are present.
    pub fn is_complete(&self) -> bool {
        !self.app_id.is_empty() && !self.app_secret.is_empty()
    }

    /// Returns the key under which probe outcomes for this account are cached.
    ///
    /// This is the account id when one is set and non-empty, the app id
    /// otherwise. An empty account id counts as unset, so `Some("")` keys by
    /// app id rather than caching every such account under `""`. The secret
    /// never participates.
    pub fn cache_key(&self) -> &str {
        match self.account_id.as_deref() {
            Some(account_id) if !account_id.is_empty() => account_id,
            _ => &self.app_id,
        }
    }
}

impl fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("domain", &self.domain)
            .finish()
    }
}
