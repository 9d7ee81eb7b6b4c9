//! Bot platform service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{BotCredentials, BotInfoResponse, BotPlatformProvider, Error, Result};

/// Tracing target for bot platform service operations.
pub const TRACING_TARGET: &str = "feishu_core::service";

/// Default time allowed for one bot info request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bot platform service wrapper with observability.
///
/// This wrapper adds structured logging and a request deadline to any
/// [`BotPlatformProvider`]. The inner provider is wrapped in `Arc` for cheap
/// cloning.
#[derive(Clone)]
pub struct BotPlatformService {
    inner: Arc<dyn BotPlatformProvider>,
    timeout: Duration,
}

impl fmt::Debug for BotPlatformService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotPlatformService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BotPlatformService {
    /// Create a new service wrapper with the default request timeout.
    pub fn new<P>(provider: P) -> Self
    where
        P: BotPlatformProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Sets the request timeout. A zero duration keeps the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the bot info for the given credentials.
    ///
    /// A request outliving the timeout is abandoned and reported as
    /// [`ErrorKind::Timeout`](crate::ErrorKind::Timeout).
    pub async fn bot_info(&self, credentials: &BotCredentials) -> Result<BotInfoResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            app_id = %credentials.app_id,
            domain = %credentials.domain,
            timeout_ms = self.timeout.as_millis(),
            "Requesting bot info"
        );

        let result = match tokio::time::timeout(self.timeout, self.inner.bot_info(credentials))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::timeout().with_message(format!(
                "request timed out after {}ms",
                self.timeout.as_millis()
            ))),
        };
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) if response.is_success() => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    app_id = %credentials.app_id,
                    elapsed_ms = elapsed.as_millis(),
                    "Bot info received"
                );
            }
            Ok(response) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    app_id = %credentials.app_id,
                    code = ?response.code,
                    msg = ?response.msg,
                    elapsed_ms = elapsed.as_millis(),
                    "Bot info rejected by platform"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    app_id = %credentials.app_id,
                    kind = %error.kind,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Bot info request failed"
                );
            }
        }

        result
    }

    /// Create a mock service for testing.
    #[cfg(any(test, feature = "test-utils"))]
    #[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
    pub fn mock(provider: crate::MockBotPlatform) -> Self {
        Self::new(provider)
    }
}
