//! Time-to-live cache shared by every request path
//!
//! Provides a `TtlCache` that keeps opaque byte payloads in memory. A successful
//! read refreshes the entry's age, so only keys that go unread for a full
//! interval are reclaimed. Expiry is enforced solely by the background reaper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Errors that can occur when constructing a cache
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The reaper period and the staleness threshold cannot be zero
    #[error("cache interval must be greater than zero")]
    ZeroInterval,
}

/// A single cached payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Raw response body, never interpreted by the cache
    value: Vec<u8>,
    /// Set on insert and reset on every successful read
    created_at: Instant,
}

type Store = Arc<Mutex<HashMap<String, CacheEntry>>>;

/// Thread-safe, self-expiring key/value store for response bodies
///
/// The cache is created once and shared by reference (usually behind an `Arc`).
/// Construction spawns a reaper task on the current Tokio runtime which sweeps
/// the store every `interval` and removes entries that have not been written or
/// read within the last `interval`. The reaper stops when the cache is dropped
/// or [`TtlCache::shutdown`] is called.
#[derive(Debug)]
pub struct TtlCache {
    /// All entries behind one coarse lock, shared with the reaper
    entries: Store,
    /// Staleness threshold and sweep period
    interval: Duration,
    /// Dropping this closes the channel and ends the reaper
    shutdown_tx: mpsc::Sender<()>,
}

impl TtlCache {
    /// Creates an empty cache and starts its background reaper
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Arguments
    /// * `interval` - How long an unread entry survives, and how often the reaper runs
    ///
    /// # Returns
    /// * `Ok(TtlCache)` with the reaper scheduled to first run one `interval` from now
    /// * `Err(CacheError::ZeroInterval)` if `interval` is zero
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }

        let entries: Store = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::spawn(reap_loop(Arc::clone(&entries), interval, ticker, shutdown_rx));

        Ok(Self {
            entries,
            interval,
            shutdown_tx,
        })
    }

    /// Inserts or replaces the entry for `key`, stamping it with the current time
    pub fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let entry = CacheEntry {
            value: value.into(),
            created_at: Instant::now(),
        };
        self.entries.lock().insert(key.into(), entry);
    }

    /// Returns a copy of the payload stored under `key`
    ///
    /// A hit resets the entry's age, extending its life by a full interval.
    /// Age is not checked here: an entry past its interval stays readable
    /// until the reaper's next sweep removes it.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        entry.created_at = Instant::now();
        Some(entry.value.clone())
    }

    /// Number of entries currently held, including stale ones not yet reaped
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The configured staleness threshold and sweep period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one sweep immediately and returns the number of entries removed
    pub(crate) fn reap(&self) -> usize {
        reap(&self.entries, self.interval)
    }

    /// Stops the background reaper
    ///
    /// Entries already stored remain readable but will no longer expire.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Removes every entry whose age has reached `interval` in one critical section
fn reap(entries: &Mutex<HashMap<String, CacheEntry>>, interval: Duration) -> usize {
    let mut entries = entries.lock();
    let now = Instant::now();
    let before = entries.len();

    entries.retain(|_, entry| now.duration_since(entry.created_at) < interval);

    before - entries.len()
}

async fn reap_loop(
    entries: Store,
    interval: Duration,
    mut ticker: Interval,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                tracing::debug!("cache reaper stopped");
                break;
            }
            _ = ticker.tick() => {
                let removed = reap(&entries, interval);
                if removed > 0 {
                    tracing::debug!(removed, "reaped expired cache entries");
                }
            }
        }
    }
}
