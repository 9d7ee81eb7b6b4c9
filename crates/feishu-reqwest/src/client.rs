//! Reqwest-based open platform client.

use std::sync::Arc;

use feishu_core::{BotCredentials, BotInfoResponse, BotPlatformProvider, BotPlatformService};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::token::{TENANT_TOKEN_PATH, TenantTokenRequest, TenantTokenResponse};
use crate::{Error, ReqwestConfig, Result, TRACING_TARGET};

/// Path of the bot info endpoint.
const BOT_INFO_PATH: &str = "/open-apis/bot/v3/info";

/// Inner client that holds the HTTP client and configuration.
struct FeishuClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based client for the Feishu/Lark open platform.
///
/// Each [`bot_info`](BotPlatformProvider::bot_info) call exchanges the app
/// credentials for a tenant access token and then fetches the bot info with
/// it. Tokens are not kept between calls.
///
/// # Examples
///
/// ```rust,ignore
/// use feishu_core::BotCredentials;
/// use feishu_reqwest::{FeishuClient, ReqwestConfig};
///
/// let client = FeishuClient::new(ReqwestConfig::default())?;
/// let service = client.into_service();
///
/// let response = service.bot_info(&BotCredentials::new("cli_abc", "s3cret")).await?;
/// ```
#[derive(Clone)]
pub struct FeishuClient {
    inner: Arc<FeishuClientInner>,
}

impl std::fmt::Debug for FeishuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeishuClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl FeishuClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.as_millis(),
            base_url = config.base_url.as_ref().map(Url::as_str),
            "Creating open platform client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()?;

        let inner = FeishuClientInner { http, config };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Open platform client created successfully"
        );

        Ok(client)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into a [`BotPlatformService`].
    pub fn into_service(self) -> BotPlatformService {
        BotPlatformService::new(self)
    }

    /// Builds the URL of `path` on the host serving `credentials`.
    fn endpoint(&self, credentials: &BotCredentials, path: &str) -> Result<Url> {
        let base = match &self.inner.config.base_url {
            Some(base_url) => base_url.as_str(),
            None => credentials.domain.base_url(),
        };

        let url = Url::parse(&format!("{}{path}", base.trim_end_matches('/')))?;
        Ok(url)
    }

    /// Exchanges the app credentials for a tenant access token.
    async fn tenant_token(&self, credentials: &BotCredentials) -> Result<TenantTokenResponse> {
        let url = self.endpoint(credentials, TENANT_TOKEN_PATH)?;

        let response = self
            .inner
            .http
            .post(url)
            .json(&TenantTokenRequest::from(credentials))
            .send()
            .await?;

        read_json(response).await
    }

    /// Fetches the bot info using a tenant access token.
    async fn fetch_bot_info(
        &self,
        credentials: &BotCredentials,
        token: &str,
    ) -> Result<BotInfoResponse> {
        let url = self.endpoint(credentials, BOT_INFO_PATH)?;

        let response = self
            .inner
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Decodes a platform JSON body whatever the HTTP status.
///
/// The platform reports most failures as a JSON body with a non-zero `code`,
/// often alongside a 4xx status. A body that does not decode is reported as
/// [`Error::HttpStatus`] when the status is not a success.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(Error::HttpStatus {
            status: status.as_u16(),
        }),
        Err(e) => Err(Error::Serde(e)),
    }
}

#[async_trait::async_trait]
impl BotPlatformProvider for FeishuClient {
    async fn bot_info(&self, credentials: &BotCredentials) -> feishu_core::Result<BotInfoResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            app_id = %credentials.app_id,
            domain = %credentials.domain,
            "Requesting tenant access token"
        );

        let token_response = self.tenant_token(credentials).await?;
        if !token_response.is_granted() {
            tracing::debug!(
                target: TRACING_TARGET,
                app_id = %credentials.app_id,
                code = ?token_response.code,
                "Tenant access token refused"
            );

            return Ok(BotInfoResponse {
                code: token_response.code,
                msg: token_response.msg,
                ..BotInfoResponse::default()
            });
        }

        let token = token_response.token().ok_or(Error::MissingToken)?;
        let response = self.fetch_bot_info(credentials, token).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            app_id = %credentials.app_id,
            code = ?response.code,
            "Bot info fetched"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use feishu_core::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn credentials() -> BotCredentials {
        BotCredentials::new("cli_abc", "s3cret")
    }

    fn client(server: &MockServer) -> FeishuClient {
        let base_url = Url::parse(&server.uri()).unwrap();
        FeishuClient::new(ReqwestConfig::default().with_base_url(base_url)).unwrap()
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(TENANT_TOKEN_PATH))
            .and(body_json(json!({"app_id": "cli_abc", "app_secret": "s3cret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "ok",
                "tenant_access_token": "t-123",
                "expire": 7200
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_bot_info_success() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .and(header("authorization", "Bearer t-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "ok",
                "bot": {"app_name": "Bot", "open_id": "ou_1", "activate_status": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server).bot_info(&credentials()).await.unwrap();
        assert!(response.is_success());

        let bot = response.bot().unwrap();
        assert_eq!(bot.bot_name.as_deref(), Some("Bot"));
        assert_eq!(bot.open_id.as_deref(), Some("ou_1"));
    }

    #[tokio::test]
    async fn test_bot_info_api_error_with_error_status() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 99991400,
                "msg": "app not found"
            })))
            .mount(&server)
            .await;

        let response = client(&server).bot_info(&credentials()).await.unwrap();
        assert!(!response.is_success());
        assert_eq!(response.api_error(), "API error: app not found");
    }

    #[tokio::test]
    async fn test_refused_token_skips_bot_info() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TENANT_TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 10003,
                "msg": "invalid param"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = client(&server).bot_info(&credentials()).await.unwrap();
        assert_eq!(response.code, Some(10003));
        assert_eq!(response.api_error(), "API error: invalid param");
    }

    #[tokio::test]
    async fn test_granted_token_without_value_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TENANT_TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "ok"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 99991663,
                "msg": "tenant access token invalid"
            })))
            .expect(0)
            .mount(&server)
            .await;

        let error = client(&server).bot_info(&credentials()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
        assert_eq!(error.reason(), "tenant access token missing from response");
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let error = client(&server).bot_info(&credentials()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ExternalError);
        assert_eq!(error.reason(), "unexpected HTTP status 502");
    }

    #[tokio::test]
    async fn test_non_json_success_status() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path(BOT_INFO_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let error = client(&server).bot_info(&credentials()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_endpoint_uses_domain() {
        let client = FeishuClient::new(ReqwestConfig::default()).unwrap();

        let url = client.endpoint(&credentials(), BOT_INFO_PATH).unwrap();
        assert_eq!(url.as_str(), "https://open.feishu.cn/open-apis/bot/v3/info");

        let lark = credentials().with_domain(feishu_core::FeishuDomain::Lark);
        let url = client.endpoint(&lark, BOT_INFO_PATH).unwrap();
        assert_eq!(url.as_str(), "https://open.larksuite.com/open-apis/bot/v3/info");
    }
}
