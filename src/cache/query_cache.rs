//! Query Cache
//!
//! Memoizes fetch results per [`QueryKey`] and deduplicates in-flight requests:
//! at most one fetch is outstanding per key. Entries are never evicted; the
//! upstream dataset is small and fixed (about 10 users, 100 posts, 500 comments).

use super::entry::{QueryEntry, QueryState};
use crate::resource::{Fetcher, QueryKey};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Live slot for one key: the current attempt and the channel observers watch
struct Slot {
    attempt: u64,
    tx: watch::Sender<QueryEntry>,
}

type SlotMap = Arc<Mutex<HashMap<QueryKey, Slot>>>;

fn lock_slots(slots: &Mutex<HashMap<QueryKey, Slot>>) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-key memoized store of query results.
///
/// Constructed explicitly and passed around; clones share the same entries.
/// Fetches are spawned onto the current Tokio runtime, so the methods that may
/// start one (`get`, `subscribe`, `settled`, `invalidate`) must be called from
/// within a runtime.
pub struct QueryCache<F: Fetcher> {
    fetcher: Arc<F>,
    slots: SlotMap,
    attempts: Arc<AtomicU64>,
}

impl<F: Fetcher> Clone for QueryCache<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            slots: Arc::clone(&self.slots),
            attempts: Arc::clone(&self.attempts),
        }
    }
}

impl<F: Fetcher> QueryCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_fetcher(Arc::new(fetcher))
    }

    /// Build a cache around a fetcher the caller keeps a handle to
    pub fn with_fetcher(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            slots: Arc::new(Mutex::new(HashMap::new())),
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Current entry for `key`, starting the first fetch if the key is new.
    ///
    /// Calls for a key that is already in flight observe the same pending
    /// entry; errors are returned as stored and never retried here.
    pub fn get(&self, key: &QueryKey) -> QueryEntry {
        let rx = self.subscribe(key);
        let entry = rx.borrow().clone();
        entry
    }

    /// Current entry for `key` without ever starting a fetch
    pub fn peek(&self, key: &QueryKey) -> Option<QueryEntry> {
        lock_slots(&self.slots)
            .get(key)
            .map(|slot| slot.tx.borrow().clone())
    }

    /// Watch `key`, starting the first fetch if the key is new
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<QueryEntry> {
        let mut slots = lock_slots(&self.slots);
        if let Some(slot) = slots.get(key) {
            return slot.tx.subscribe();
        }

        let attempt = self.next_attempt();
        let (tx, rx) = watch::channel(QueryEntry::pending(*key, attempt));
        slots.insert(*key, Slot { attempt, tx });
        drop(slots);

        self.spawn_fetch(*key, attempt);
        rx
    }

    /// Wait until `key` reaches success or error
    pub async fn settled(&self, key: &QueryKey) -> QueryEntry {
        let mut rx = self.subscribe(key);
        let settled = rx
            .wait_for(QueryEntry::is_settled)
            .await
            .map(|entry| entry.clone());

        match settled {
            Ok(entry) => entry,
            // Sender gone means the cache itself was dropped
            Err(_) => rx.borrow().clone(),
        }
    }

    /// Start a new fetch attempt for `key`.
    ///
    /// The entry goes back to pending and existing observers follow the new
    /// attempt. A key whose current attempt is still in flight is left alone
    /// and its pending entry returned, so at most one fetch is outstanding
    /// per key.
    pub fn invalidate(&self, key: &QueryKey) -> QueryEntry {
        let mut slots = lock_slots(&self.slots);
        if let Some(slot) = slots.get(key) {
            let current = slot.tx.borrow().clone();
            if current.is_pending() {
                tracing::debug!("{} already in flight (attempt {})", key, current.attempt);
                return current;
            }
        }

        let attempt = self.next_attempt();
        let entry = QueryEntry::pending(*key, attempt);
        match slots.get_mut(key) {
            Some(slot) => {
                slot.attempt = attempt;
                slot.tx.send_replace(entry.clone());
            },
            None => {
                let (tx, _rx) = watch::channel(entry.clone());
                slots.insert(*key, Slot { attempt, tx });
            },
        }
        drop(slots);

        tracing::info!("Invalidated {}", key);
        self.spawn_fetch(*key, attempt);
        entry
    }

    /// Number of keys ever requested
    pub fn len(&self) -> usize {
        lock_slots(&self.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        lock_slots(&self.slots).keys().copied().collect()
    }

    fn next_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn spawn_fetch(&self, key: QueryKey, attempt: u64) {
        let fetcher = Arc::clone(&self.fetcher);
        let slots = Arc::clone(&self.slots);

        tracing::debug!("Fetching {} (attempt {})", key, attempt);

        tokio::spawn(async move {
            let state = match fetcher.fetch(&key).await {
                Ok(payload) => {
                    tracing::debug!("Fetched {} ({} records)", key, payload.len());
                    QueryState::Success(payload)
                },
                Err(err) => {
                    tracing::warn!("Fetch of {} failed: {}", key, err);
                    QueryState::Error(err)
                },
            };

            let slots = lock_slots(&slots);
            match slots.get(&key) {
                Some(slot) if slot.attempt == attempt => {
                    slot.tx.send_replace(QueryEntry {
                        key,
                        attempt,
                        state,
                    });
                },
                _ => {
                    tracing::debug!("Discarding stale result for {} (attempt {})", key, attempt);
                },
            }
        });
    }
}
