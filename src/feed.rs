//! Change notification for the batch listing.
//!
//! [`BatchFeed`] wraps a repository. Subscribers receive the complete list of
//! batches, newest first, when they subscribe and again after every
//! successful write made through the feed.
//!
//! The feed is an in-process API. The HTTP service only attaches a logging
//! subscriber; clients of the JSON API poll the listing instead.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use thiserror::Error;

use crate::domain::batch::{Batch, NewBatch};
use crate::domain::types::{BatchId, BatchStatus};
use crate::repository::{BatchReader, BatchWriter, RepositoryError, RepositoryResult};

/// Callback invoked with each ordered snapshot.
pub type SnapshotCallback = dyn Fn(&[Batch]) + Send + Sync;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to load batches: {0}")]
    Repository(#[from] RepositoryError),
    #[error("feed lock poisoned")]
    LockPoisoned,
}

pub type FeedResult<T> = Result<T, FeedError>;

struct FeedState {
    next_subscriber_id: u64,
    subscribers: BTreeMap<u64, Arc<SnapshotCallback>>,
}

impl FeedState {
    fn new() -> Self {
        Self {
            next_subscriber_id: 1,
            subscribers: BTreeMap::new(),
        }
    }
}

/// Repository decorator that pushes ordered snapshots to subscribers.
///
/// Snapshot loading and delivery happen under a single delivery lock, so a
/// subscriber registering concurrently with a write still receives that
/// write, and no subscriber sees an older listing after a newer one.
/// Callbacks run while that lock is held: they may drop their own
/// [`Subscription`] but must not write through, subscribe to, or publish on
/// the same feed.
pub struct BatchFeed<R> {
    repo: R,
    inner: Arc<Mutex<FeedState>>,
    delivery: Mutex<()>,
}

impl<R> BatchFeed<R>
where
    R: BatchReader,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            inner: Arc::new(Mutex::new(FeedState::new())),
            delivery: Mutex::new(()),
        }
    }

    /// Register `callback` and deliver the current listing to it.
    ///
    /// Delivery continues until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> FeedResult<Subscription>
    where
        F: Fn(&[Batch]) + Send + Sync + 'static,
    {
        let _delivery = self.lock_delivery()?;

        let snapshot = self.repo.list_batches()?;
        let callback: Arc<SnapshotCallback> = Arc::new(callback);

        let id = {
            let mut state = self.lock_state()?;
            let id = state.next_subscriber_id;
            state.next_subscriber_id = state.next_subscriber_id.saturating_add(1);
            state.subscribers.insert(id, Arc::clone(&callback));
            id
        };

        callback(&snapshot);
        log::debug!("Batch feed subscriber {id} registered");

        Ok(Subscription {
            id,
            state: Arc::downgrade(&self.inner),
        })
    }

    /// Reload the listing and deliver it to every subscriber.
    pub fn publish(&self) -> FeedResult<()> {
        let _delivery = self.lock_delivery()?;

        let callbacks = self
            .lock_state()?
            .subscribers
            .values()
            .cloned()
            .collect::<Vec<_>>();
        if callbacks.is_empty() {
            return Ok(());
        }

        let snapshot = self.repo.list_batches()?;
        for callback in callbacks {
            callback(&snapshot);
        }
        Ok(())
    }

    pub fn subscriber_count(&self) -> FeedResult<usize> {
        Ok(self.lock_state()?.subscribers.len())
    }

    fn lock_state(&self) -> FeedResult<MutexGuard<'_, FeedState>> {
        self.inner.lock().map_err(|_| FeedError::LockPoisoned)
    }

    fn lock_delivery(&self) -> FeedResult<MutexGuard<'_, ()>> {
        self.delivery.lock().map_err(|_| FeedError::LockPoisoned)
    }

    fn notify_after_write(&self) {
        if let Err(e) = self.publish() {
            log::error!("Failed to notify batch subscribers: {e}");
        }
    }
}

/// Handle returned by [`BatchFeed::subscribe`].
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<FeedState>>,
}

impl Subscription {
    /// Stop receiving snapshots.
    pub fn unsubscribe(self) {
        drop(self);
    }

    fn remove(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        match state.lock() {
            Ok(mut state) => {
                state.subscribers.remove(&self.id);
                log::debug!("Batch feed subscriber {} removed", self.id);
            }
            Err(_) => log::error!("Batch feed lock poisoned while unsubscribing {}", self.id),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl<R> BatchReader for BatchFeed<R>
where
    R: BatchReader,
{
    fn list_batches(&self) -> RepositoryResult<Vec<Batch>> {
        self.repo.list_batches()
    }

    fn get_batch_by_id(&self, id: BatchId) -> RepositoryResult<Option<Batch>> {
        self.repo.get_batch_by_id(id)
    }
}

impl<R> BatchWriter for BatchFeed<R>
where
    R: BatchReader + BatchWriter,
{
    fn create_batch(&self, batch: &NewBatch) -> RepositoryResult<BatchId> {
        let id = self.repo.create_batch(batch)?;
        self.notify_after_write();
        Ok(id)
    }

    fn update_batch_status(&self, id: BatchId, status: BatchStatus) -> RepositoryResult<usize> {
        let affected = self.repo.update_batch_status(id, status)?;
        if affected > 0 {
            self.notify_after_write();
        }
        Ok(affected)
    }
}
