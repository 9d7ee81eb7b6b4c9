//! Prober configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default lifetime of cached probe outcomes: 24 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Default timeout of one remote probe: 30 seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Configuration for the [`Prober`](crate::Prober).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ProbeConfig {
    /// Lifetime of cached probe outcomes in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "probe-cache-ttl", env = "PROBE_CACHE_TTL", default_value = "86400")
    )]
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl: u64,

    /// Timeout of one remote probe in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "probe-timeout", env = "PROBE_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout: u64,
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl_secs(),
            probe_timeout: default_probe_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    /// Returns the cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Returns the effective probe timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.probe_timeout == 0 {
            Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.probe_timeout)
        }
    }

    /// Set the cache TTL in seconds.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl_secs: u64) -> Self {
        self.cache_ttl = cache_ttl_secs;
        self
    }

    /// Set the probe timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.probe_timeout = timeout_secs;
        self
    }
}
