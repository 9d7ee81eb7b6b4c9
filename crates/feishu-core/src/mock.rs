//! Mock bot platform for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! feishu-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use feishu_core::{BotInfoResponse, BotPlatformService, ErrorKind, MockBotPlatform};
//!
//! let provider = MockBotPlatform::with_error(ErrorKind::NetworkError, "ECONNRESET")
//!     .then_response(BotInfoResponse::error(99991400, "app not found"));
//! let service = BotPlatformService::mock(provider.clone());
//!
//! // ... drive the service ...
//! assert_eq!(provider.calls(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::{
    BotCredentials, BotIdentity, BotInfoResponse, BotPlatformProvider, Error, ErrorKind, Result,
};

/// One scripted answer of the mock platform.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Answer with the given response.
    Response(BotInfoResponse),
    /// Fail with an error of the given kind and message.
    Error { kind: ErrorKind, message: String },
}

impl MockOutcome {
    fn into_result(self) -> Result<BotInfoResponse> {
        match self {
            Self::Response(response) => Ok(response),
            Self::Error { kind, message } => Err(Error::new(kind).with_message(message)),
        }
    }
}

#[derive(Debug)]
struct MockState {
    queued: VecDeque<MockOutcome>,
    fallback: MockOutcome,
    delay: Option<Duration>,
    last_app_id: Option<String>,
}

/// Scriptable bot platform.
///
/// Queued outcomes are returned in order, one per call; once they run out
/// the fallback outcome is returned for every further call. Clones share the
/// script and the call counter.
#[derive(Debug, Clone)]
pub struct MockBotPlatform {
    state: Arc<Mutex<MockState>>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBotPlatform {
    fn default() -> Self {
        Self::new(MockOutcome::Response(BotInfoResponse::success(
            BotIdentity::new("mock-bot", "ou_mock"),
        )))
    }
}

impl MockBotPlatform {
    /// Creates a mock answering every call with `fallback`.
    pub fn new(fallback: MockOutcome) -> Self {
        let state = MockState {
            queued: VecDeque::new(),
            fallback,
            delay: None,
            last_app_id: None,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a mock answering every call with the given response.
    pub fn with_response(response: BotInfoResponse) -> Self {
        Self::new(MockOutcome::Response(response))
    }

    /// Creates a mock failing every call with the given error.
    pub fn with_error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(MockOutcome::Error {
            kind,
            message: message.into(),
        })
    }

    /// Answers the current fallback once more, then `then` for every later call.
    pub fn then(self, then: MockOutcome) -> Self {
        {
            let mut state = self.state();
            let previous = std::mem::replace(&mut state.fallback, then);
            state.queued.push_back(previous);
        }
        self
    }

    /// Answers the current fallback once more, then `response` from then on.
    pub fn then_response(self, response: BotInfoResponse) -> Self {
        self.then(MockOutcome::Response(response))
    }

    /// Answers the current fallback once more, then fails from then on.
    pub fn then_error(self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.then(MockOutcome::Error {
            kind,
            message: message.into(),
        })
    }

    /// Delays every answer by `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state().delay = Some(delay);
        self
    }

    /// Returns how many times the platform was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the app id of the most recent call.
    pub fn last_app_id(&self) -> Option<String> {
        self.state().last_app_id.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl BotPlatformProvider for MockBotPlatform {
    async fn bot_info(&self, credentials: &BotCredentials) -> Result<BotInfoResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (outcome, delay) = {
            let mut state = self.state();
            state.last_app_id = Some(credentials.app_id.clone());
            let outcome = match state.queued.pop_front() {
                Some(outcome) => outcome,
                None => state.fallback.clone(),
            };
            (outcome, state.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        outcome.into_result()
    }
}
