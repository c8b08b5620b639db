//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting per client key, held in process memory.
//!
//! Each key owns one [`RateLimitEntry`]. The first request of a window sets
//! `count = 1` and `window_reset_at_ms = now + window`; later requests in the
//! window increment the counter and are allowed while `count <= limit`. Once
//! `now >= window_reset_at_ms` the entry is replaced, so an overflowing window
//! never leaks into the next one.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 100 requests per minute, the setting of the public read endpoints
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Window length in milliseconds, clamped to `i64::MAX`
    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }

    /// Both the limit and the window must be positive
    pub fn is_valid(&self) -> bool {
        self.max_requests > 0 && !self.window.is_zero()
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Always the entry's `window_reset_at_ms`
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, never less than one
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let wait_ms = self.reset_at_ms.saturating_sub(now_ms).max(0) as u64;
        wait_ms.div_ceil(1000).max(1)
    }
}

/// Per-key counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at_ms: i64,
}

/// Millisecond time source
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by_ms: i64) {
        self.now_ms.fetch_add(by_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request for `key` and report whether it may proceed.
    /// Never fails: a store that cannot decide must allow.
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult;

    /// Current time on the store's clock, used for `Retry-After`
    fn now_ms(&self) -> i64;
}

/// In-memory fixed-window limiter
///
/// Created once at startup and shared through an `Arc`. The read, compare and
/// increment of one key all happen under that key's `DashMap` shard guard, so
/// concurrent requests cannot lose increments.
#[derive(Debug)]
pub struct FixedWindowRateLimiter<C = SystemClock> {
    entries: DashMap<String, RateLimitEntry>,
    clock: C,
}

impl FixedWindowRateLimiter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FixedWindowRateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FixedWindowRateLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Record one request for `key` under `config`
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        let now = self.clock.now_ms();
        let window_ms = config.window_ms().max(1);
        let limit = config.max_requests;

        let (count, reset_at_ms) = {
            let mut entry = self
                .entries
                .entry(key.to_owned())
                .or_insert(RateLimitEntry {
                    count: 0,
                    window_reset_at_ms: now.saturating_add(window_ms),
                });

            if now >= entry.window_reset_at_ms {
                entry.count = 0;
                entry.window_reset_at_ms = now.saturating_add(window_ms);
            }

            // Saturating: the counter keeps rising past the limit but never wraps.
            entry.count = entry.count.saturating_add(1);
            (entry.count, entry.window_reset_at_ms)
        };

        let allowed = count <= limit;
        if !allowed && count == limit.saturating_add(1) {
            tracing::warn!(key = %key, limit = limit, reset_at_ms = reset_at_ms, "Rate limit exceeded");
        }

        RateLimitResult {
            allowed,
            limit,
            remaining: if allowed { limit - count } else { 0 },
            reset_at_ms,
        }
    }

    /// Drop entries whose window has expired, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0usize;
        self.entries.retain(|_, entry| {
            let live = entry.window_reset_at_ms > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    /// Snapshot of a key's entry
    pub fn entry(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|e| *e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Clock> RateLimitStore for FixedWindowRateLimiter<C> {
    async fn check_and_increment(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check(key, config)
    }

    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}

/// Periodically purge expired entries so idle keys do not pile up
pub fn spawn_sweeper<C>(limiter: Arc<FixedWindowRateLimiter<C>>, every: Duration) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = limiter.purge_expired();
            if removed > 0 {
                tracing::debug!(
                    removed = removed,
                    remaining = limiter.len(),
                    "Purged expired rate limit entries"
                );
            }
        }
    })
}
