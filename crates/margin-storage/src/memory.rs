use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use margin_core::error::Result;
use margin_core::{
    Clock, ReadShareStore, Reservation, ShareCode, ShareRecord, ShareStore, StorageError,
    SystemClock,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// In-memory storage entry for a share.
#[derive(Debug, Clone)]
struct StoredShare {
    record: ShareRecord,
    expire_at: Timestamp,
}

impl StoredShare {
    fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expire_at
    }
}

/// In-memory implementation of [`ShareStore`] using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking.
///
/// Expired entries are invisible to reads and dropped when touched. Entries
/// nobody reads again are reclaimed by [`sweep`](Self::sweep), which
/// [`spawn_sweeper`](Self::spawn_sweeper) runs periodically.
#[derive(Debug, Clone)]
pub struct InMemoryShareStore<C = SystemClock> {
    storage: Arc<DashMap<String, StoredShare>>,
    clock: C,
}

impl InMemoryShareStore<SystemClock> {
    /// Creates a new in-memory store on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryShareStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryShareStore<C> {
    /// Creates a new in-memory store that reads time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Number of entries held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.storage.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!(removed, "swept expired shares");
        }
        removed
    }

    fn stored(&self, record: &ShareRecord, ttl: Duration) -> Result<StoredShare> {
        let ttl = SignedDuration::try_from(ttl)
            .map_err(|e| StorageError::Operation(format!("invalid ttl: {e}")))?;
        let expire_at = self
            .clock
            .now()
            .checked_add(ttl)
            .map_err(|e| StorageError::Operation(format!("expiry out of range: {e}")))?;
        Ok(StoredShare {
            record: record.clone(),
            expire_at,
        })
    }

    fn live(&self, key: &str) -> Option<ShareRecord> {
        let now = self.clock.now();
        let entry = self.storage.get(key)?;
        if !entry.is_expired(now) {
            return Some(entry.record.clone());
        }
        drop(entry);
        // Only remove if still expired; a concurrent writer may have replaced it.
        self.storage.remove_if(key, |_, e| e.is_expired(now));
        trace!(code = key, "dropped expired share on read");
        None
    }
}

impl<C: Clock + Clone> InMemoryShareStore<C> {
    /// Spawns a task that calls [`sweep`](Self::sweep) every `interval`.
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.sweep();
            }
        })
    }
}

#[async_trait]
impl<C: Clock> ReadShareStore for InMemoryShareStore<C> {
    async fn get(&self, code: &ShareCode) -> Result<Option<ShareRecord>> {
        Ok(self.live(code.as_str()))
    }

    async fn exists(&self, code: &ShareCode) -> Result<bool> {
        Ok(self.live(code.as_str()).is_some())
    }
}

#[async_trait]
impl<C: Clock> ShareStore for InMemoryShareStore<C> {
    async fn put(&self, code: &ShareCode, record: &ShareRecord, ttl: Duration) -> Result<()> {
        let entry = self.stored(record, ttl)?;
        self.storage.insert(code.as_str().to_owned(), entry);
        Ok(())
    }

    async fn put_if_absent(
        &self,
        code: &ShareCode,
        record: &ShareRecord,
        ttl: Duration,
    ) -> Result<Reservation> {
        let now = self.clock.now();
        let entry = self.stored(record, ttl)?;

        // The entry API holds the shard lock, so check and insert are atomic.
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired(now) {
                    return Ok(Reservation::Occupied);
                }
                occupied.insert(entry);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
            }
        }
        Ok(Reservation::Reserved)
    }
}
