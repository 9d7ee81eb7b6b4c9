//! Bot account credentials configuration.

use std::fmt;

use clap::Args;
use feishu_core::{BotCredentials, FeishuDomain};

use crate::TRACING_TARGET_CONFIG;

/// Credentials of the bot account to probe.
///
/// # Environment Variables
///
/// - `FEISHU_APP_ID` - Application identifier
/// - `FEISHU_APP_SECRET` - Application secret
/// - `FEISHU_ACCOUNT_ID` - Account identifier used as the cache key
/// - `FEISHU_DOMAIN` - `feishu` (default) or `lark`
#[derive(Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct CredentialsConfig {
    /// Application identifier.
    #[arg(long, env = "FEISHU_APP_ID")]
    pub app_id: Option<String>,

    /// Application secret.
    #[arg(long, env = "FEISHU_APP_SECRET", hide_env_values = true)]
    pub app_secret: Option<String>,

    /// Account identifier; keys cached outcomes instead of the app id.
    #[arg(long, env = "FEISHU_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Open platform serving the app.
    #[arg(long, env = "FEISHU_DOMAIN", default_value = "feishu")]
    pub domain: FeishuDomain,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .field("domain", &self.domain)
            .finish()
    }
}

impl CredentialsConfig {
    /// Builds the credentials to probe with.
    ///
    /// Returns `None` when neither the app id nor the secret was given. A
    /// partial set is passed through and reported as missing by the prober.
    pub fn to_credentials(&self) -> Option<BotCredentials> {
        if self.app_id.is_none() && self.app_secret.is_none() {
            return None;
        }

        let credentials = BotCredentials::new(
            self.app_id.clone().unwrap_or_default(),
            self.app_secret.clone().unwrap_or_default(),
        )
        .with_domain(self.domain);

        match &self.account_id {
            Some(account_id) => Some(credentials.with_account_id(account_id.clone())),
            None => Some(credentials),
        }
    }

    /// Logs the credentials configuration (the secret is never logged).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            app_id = self.app_id.as_deref(),
            account_id = self.account_id.as_deref(),
            has_secret = self.app_secret.is_some(),
            domain = %self.domain,
            "Credentials configuration"
        );
    }
}
