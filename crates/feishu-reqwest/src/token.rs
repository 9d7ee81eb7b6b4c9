//! Tenant access token exchange.

use feishu_core::BotCredentials;
use serde::{Deserialize, Serialize};

/// Path of the internal-app tenant token endpoint.
pub(crate) const TENANT_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";

#[derive(Serialize)]
pub(crate) struct TenantTokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

impl<'a> From<&'a BotCredentials> for TenantTokenRequest<'a> {
    fn from(credentials: &'a BotCredentials) -> Self {
        Self {
            app_id: &credentials.app_id,
            app_secret: &credentials.app_secret,
        }
    }
}

/// Answer of the tenant token endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TenantTokenResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expire: Option<u64>,
}

impl TenantTokenResponse {
    /// Returns whether the platform accepted the credentials.
    pub fn is_granted(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns the token, if the response carries a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.tenant_access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let credentials = BotCredentials::new("cli_abc", "s3cret");
        let body = serde_json::to_value(TenantTokenRequest::from(&credentials)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"app_id": "cli_abc", "app_secret": "s3cret"})
        );
    }

    #[test]
    fn test_granted_token() {
        let response: TenantTokenResponse = serde_json::from_str(
            r#"{"code":0,"msg":"ok","tenant_access_token":"t-123","expire":7200}"#,
        )
        .unwrap();
        assert!(response.is_granted());
        assert_eq!(response.token(), Some("t-123"));
        assert_eq!(response.expire, Some(7200));
    }

    #[test]
    fn test_rejected_token() {
        let response: TenantTokenResponse =
            serde_json::from_str(r#"{"code":10003,"msg":"invalid param"}"#).unwrap();
        assert!(!response.is_granted());
        assert_eq!(response.token(), None);
    }

    #[test]
    fn test_granted_without_token() {
        let response: TenantTokenResponse = serde_json::from_str(
            r#"{"code":0,"msg":"ok","tenant_access_token":""}"#,
        )
        .unwrap();
        assert!(response.is_granted());
        assert_eq!(response.token(), None);
    }
}
