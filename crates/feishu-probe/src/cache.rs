//! Time-bounded store of probe outcomes.
//!
//! The cache keeps the most recent [`ProbeResult`] per account key. Entries
//! expire lazily: nothing runs in the background, and an entry older than the
//! TTL is dropped by the first read that finds it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use feishu_core::ProbeResult;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;

/// Tracing target for probe cache operations.
pub const TRACING_TARGET: &str = "feishu_probe::cache";

/// Default lifetime of a cached probe outcome: 24 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A stored outcome and when it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    result: ProbeResult,
    cached_at: Timestamp,
}

/// Store of probe outcomes keyed by account.
///
/// Successful and failed outcomes share one TTL. Expired entries are removed
/// on read; there is no size bound and no background sweep.
///
/// # Thread Safety
///
/// This type is `Clone` and all clones share the same underlying map through
/// `Arc`. One mutex guards the whole map; no critical section awaits anything
/// but the lock itself.
///
/// # Example
///
/// ```no_run
/// # use feishu_probe::ProbeCache;
/// # use feishu_core::ProbeResult;
/// # async fn example() {
/// let cache = ProbeCache::new();
///
/// cache.set("cli_abc", ProbeResult::failed("cli_abc", "ECONNRESET")).await;
/// assert!(cache.get("cli_abc").await.is_some());
///
/// // Drop one entry, or everything.
/// cache.invalidate(Some("cli_abc")).await;
/// cache.invalidate(None).await;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProbeCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl: SignedDuration,
}

impl ProbeCache {
    /// Creates an empty cache with the default TTL of 24 hours.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Creates an empty cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        let ttl = SignedDuration::try_from(ttl).unwrap_or(SignedDuration::MAX);

        tracing::debug!(
            target: TRACING_TARGET,
            ttl_secs = ttl.as_secs(),
            "Probe cache initialized"
        );

        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the lifetime of cached outcomes.
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Returns the cached outcome for `key`, if present and fresh.
    pub async fn get(&self, key: &str) -> Option<ProbeResult> {
        self.get_at(key, Timestamp::now()).await
    }

    /// Returns the cached outcome for `key` as seen at time `now`.
    ///
    /// An entry older than the TTL at `now` is removed and `None` returned.
    /// An entry exactly TTL old is still fresh.
    pub async fn get_at(&self, key: &str, now: Timestamp) -> Option<ProbeResult> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;

        let age = now.duration_since(entry.cached_at);
        if age > self.ttl {
            entries.remove(key);

            tracing::debug!(
                target: TRACING_TARGET,
                key,
                age_secs = age.as_secs(),
                "Probe cache entry expired"
            );

            return None;
        }

        Some(entry.result.clone())
    }

    /// Stores `result` under `key`, replacing any previous entry.
    pub async fn set(&self, key: &str, result: ProbeResult) {
        self.set_at(key, result, Timestamp::now()).await;
    }

    /// Stores `result` under `key` as if written at time `now`.
    pub async fn set_at(&self, key: &str, result: ProbeResult, now: Timestamp) {
        let entry = CacheEntry {
            result,
            cached_at: now,
        };

        self.entries.lock().await.insert(key.to_owned(), entry);

        tracing::trace!(
            target: TRACING_TARGET,
            key,
            "Probe cache entry stored"
        );
    }

    /// Removes the entry for `key`, or every entry when `key` is `None`.
    pub async fn invalidate(&self, key: Option<&str>) {
        let mut entries = self.entries.lock().await;

        match key {
            Some(key) => {
                let removed = entries.remove(key).is_some();
                tracing::debug!(
                    target: TRACING_TARGET,
                    key,
                    removed,
                    "Probe cache entry invalidated"
                );
            }
            None => {
                let removed = entries.len();
                entries.clear();
                tracing::debug!(
                    target: TRACING_TARGET,
                    removed,
                    "Probe cache cleared"
                );
            }
        }
    }

    /// Returns the number of stored entries, expired ones included.
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for ProbeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_result() -> ProbeResult {
        ProbeResult::Ok {
            app_id: "cli_abc".to_owned(),
            bot_name: Some("Bot".to_owned()),
            bot_open_id: Some("ou_1".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = ProbeCache::new();
        assert!(cache.get("cli_abc").await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = ProbeCache::new();
        cache.set("cli_abc", ok_result()).await;

        assert_eq!(cache.get("cli_abc").await, Some(ok_result()));
    }

    #[tokio::test]
    async fn test_set_replaces_entry() {
        let cache = ProbeCache::new();
        cache.set("cli_abc", ok_result()).await;
        cache
            .set("cli_abc", ProbeResult::failed("cli_abc", "ECONNRESET"))
            .await;

        let cached = cache.get("cli_abc").await.unwrap();
        assert_eq!(cached.error(), Some("ECONNRESET"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_entry_past_ttl_is_removed() {
        let cache = ProbeCache::new();
        let now = Timestamp::now();
        let stored_at = now - SignedDuration::from_hours(24) - SignedDuration::from_millis(1);

        cache.set_at("cli_abc", ok_result(), stored_at).await;

        assert!(cache.get_at("cli_abc", now).await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_entry_within_ttl_is_kept() {
        let cache = ProbeCache::new();
        let now = Timestamp::now();
        let stored_at = now - SignedDuration::from_hours(24) + SignedDuration::from_millis(1);

        cache.set_at("cli_abc", ok_result(), stored_at).await;

        assert_eq!(cache.get_at("cli_abc", now).await, Some(ok_result()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_custom_ttl() {
        let cache = ProbeCache::with_ttl(Duration::from_secs(60));
        let now = Timestamp::now();

        cache
            .set_at("cli_abc", ok_result(), now - SignedDuration::from_secs(61))
            .await;
        assert!(cache.get_at("cli_abc", now).await.is_none());

        cache
            .set_at("cli_abc", ok_result(), now - SignedDuration::from_secs(59))
            .await;
        assert!(cache.get_at("cli_abc", now).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_single_key() {
        let cache = ProbeCache::new();
        cache.set("cli_abc", ok_result()).await;
        cache.set("cli_def", ok_result()).await;

        cache.invalidate(Some("cli_abc")).await;

        assert!(cache.get("cli_abc").await.is_none());
        assert!(cache.get("cli_def").await.is_some());

        // Absent keys are a no-op.
        cache.invalidate(Some("cli_missing")).await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = ProbeCache::new();
        cache.set("cli_abc", ok_result()).await;
        cache.set("cli_def", ok_result()).await;

        cache.invalidate(None).await;

        assert_eq!(cache.len().await, 0);
        assert!(cache.get("cli_abc").await.is_none());
        assert!(cache.get("cli_def").await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ProbeCache::new();
        let clone = cache.clone();

        clone.set("cli_abc", ok_result()).await;
        assert!(cache.get("cli_abc").await.is_some());
    }

    #[test]
    fn test_default_ttl() {
        let cache = ProbeCache::default();
        assert_eq!(cache.ttl(), SignedDuration::from_hours(24));
    }
}
