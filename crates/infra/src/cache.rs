//! Day-layout caching with moka
//!
//! Advisory TTL cache behind the core `LayoutCache` port, keyed by
//! `(date, fingerprint-of-appointment-set)`. Safe under concurrent reads
//! and writes without locking; duplicate recomputation is tolerated by
//! design because the layout is a pure function of its snapshot.

use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;
use praxis_core::LayoutCache;
use praxis_domain::constants::{DEFAULT_LAYOUT_CACHE_CAPACITY, DEFAULT_LAYOUT_CACHE_TTL_SECS};
use praxis_domain::DayLayout;

/// Layout cache configuration
#[derive(Debug, Clone)]
pub struct LayoutCacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,
    /// Maximum number of cached day layouts
    pub max_capacity: u64,
}

impl Default for LayoutCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(
                std::env::var("PRAXIS_LAYOUT_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_LAYOUT_CACHE_TTL_SECS),
            ),
            max_capacity: std::env::var("PRAXIS_LAYOUT_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LAYOUT_CACHE_CAPACITY),
        }
    }
}

impl LayoutCacheConfig {
    /// Create config with custom TTL (useful for testing)
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, max_capacity: DEFAULT_LAYOUT_CACHE_CAPACITY }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.ttl.as_secs(),
            max_capacity = self.max_capacity,
            "layout cache configuration loaded"
        );
    }
}

/// Moka-backed implementation of the `LayoutCache` port.
pub struct MokaLayoutCache {
    cache: Cache<(NaiveDate, u64), DayLayout>,
}

impl MokaLayoutCache {
    /// Create a cache with the given configuration.
    #[must_use]
    pub fn new(config: &LayoutCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Number of entries currently cached (approximate, for diagnostics).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for MokaLayoutCache {
    fn default() -> Self {
        Self::new(&LayoutCacheConfig::default())
    }
}

impl LayoutCache for MokaLayoutCache {
    fn get(&self, date: NaiveDate, fingerprint: u64) -> Option<DayLayout> {
        self.cache.get(&(date, fingerprint))
    }

    fn insert(&self, layout: DayLayout) {
        self.cache.insert((layout.date, layout.fingerprint), layout);
    }
}
