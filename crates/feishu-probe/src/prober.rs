//! Probe orchestration: credential checks, caching, and outcome normalization.

use feishu_core::{BotCredentials, BotPlatformService, ProbeResult};
use tracing::Instrument;
use uuid::Uuid;

use crate::{ProbeCache, ProbeConfig};

/// Tracing target for prober operations.
pub const TRACING_TARGET: &str = "feishu_probe::prober";

/// Per-call options of [`Prober::probe`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Skip the cache read. The fresh outcome is still written back.
    pub force: bool,
}

impl ProbeOptions {
    /// Options that bypass the cache read.
    pub fn force() -> Self {
        Self { force: true }
    }
}

/// Answers whether a bot account is reachable and configured.
///
/// Every outcome of a remote probe, failures included, is cached under the
/// account's cache key until the cache TTL runs out or the entry is
/// invalidated. `probe` never returns an error; every failure is reported as
/// [`ProbeResult::Failed`].
///
/// Clones share the provider and the cache.
#[derive(Debug, Clone)]
pub struct Prober {
    provider: BotPlatformService,
    cache: ProbeCache,
}

impl Prober {
    /// Creates a prober over the given provider and cache.
    pub fn new(provider: BotPlatformService, cache: ProbeCache) -> Self {
        Self { provider, cache }
    }

    /// Creates a prober with a fresh cache, both tuned by `config`.
    pub fn from_config(provider: BotPlatformService, config: &ProbeConfig) -> Self {
        let provider = provider.with_timeout(config.effective_timeout());
        let cache = ProbeCache::with_ttl(config.cache_ttl());
        Self::new(provider, cache)
    }

    /// Returns the cache backing this prober.
    pub fn cache(&self) -> &ProbeCache {
        &self.cache
    }

    /// Probes the account identified by `credentials`.
    ///
    /// Absent or incomplete credentials fail immediately without touching the
    /// cache. Otherwise a fresh cached outcome is returned as is, unless
    /// `options.force` is set, in which case the platform is always asked.
    pub async fn probe(
        &self,
        credentials: Option<&BotCredentials>,
        options: ProbeOptions,
    ) -> ProbeResult {
        let Some(credentials) = credentials.filter(|c| c.is_complete()) else {
            tracing::debug!(
                target: TRACING_TARGET,
                "Probe skipped: missing credentials"
            );
            return ProbeResult::missing_credentials();
        };

        let key = credentials.cache_key();

        if !options.force
            && let Some(cached) = self.cache.get(key).await
        {
            tracing::debug!(
                target: TRACING_TARGET,
                key,
                ok = cached.is_ok(),
                "Probe served from cache"
            );
            return cached;
        }

        let probe_id = Uuid::now_v7();
        let span = tracing::debug_span!(
            target: TRACING_TARGET,
            "probe",
            %probe_id,
            key,
            app_id = %credentials.app_id,
            force = options.force
        );

        let result = self.probe_remote(credentials).instrument(span).await;
        self.cache.set(key, result.clone()).await;

        result
    }

    /// Drops the cached outcome for `key`, or every outcome when `None`.
    pub async fn invalidate(&self, key: Option<&str>) {
        self.cache.invalidate(key).await;
    }

    /// Asks the platform and folds the answer into a [`ProbeResult`].
    async fn probe_remote(&self, credentials: &BotCredentials) -> ProbeResult {
        let app_id = credentials.app_id.as_str();

        let result = match self.provider.bot_info(credentials).await {
            Ok(response) if response.is_success() => ProbeResult::ok(app_id, response.bot()),
            Ok(response) => ProbeResult::failed(app_id, response.api_error()),
            Err(error) => ProbeResult::failed(app_id, error.reason()),
        };

        match &result {
            ProbeResult::Ok { bot_name, .. } => {
                tracing::info!(
                    target: TRACING_TARGET,
                    bot_name = bot_name.as_deref(),
                    "Probe succeeded"
                );
            }
            ProbeResult::Failed { error, .. } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Probe failed"
                );
            }
        }

        result
    }
}
