#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod credentials;
mod error;
mod health;
mod response;
mod result;
mod service;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;

pub use credentials::{BotCredentials, FeishuDomain};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::{MockBotPlatform, MockOutcome};
pub use response::{BotIdentity, BotInfoData, BotInfoResponse};
pub use result::{InvalidProbeResult, MISSING_CREDENTIALS, ProbeResult};
pub use service::{BotPlatformService, DEFAULT_REQUEST_TIMEOUT, TRACING_TARGET};

/// Core trait for bot platform access.
///
/// Implement this trait to connect the prober to a concrete open platform
/// client. Implementations authenticate with the given credentials and issue
/// a single bot info request.
#[async_trait::async_trait]
pub trait BotPlatformProvider: Send + Sync {
    /// Fetches the bot info of the app identified by `credentials`.
    ///
    /// A response with a non-zero code is still `Ok`; errors are reserved for
    /// failures to obtain a response at all.
    async fn bot_info(&self, credentials: &BotCredentials) -> Result<BotInfoResponse>;
}
