use crate::quote::Quote;
use crate::remote::{RemoteError, RemoteQuoteSource};
use crate::store::{QuoteStore, StoreError};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Default delay between reconciliation cycles
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote source error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Shared handle on the quote store
pub type SharedQuoteStore = Arc<Mutex<QuoteStore>>;

/// Result of one reconciliation cycle
#[derive(Debug, Clone)]
pub struct SyncStats {
    pub fetched: usize,
    pub added: usize,
    pub duration: Duration,
}

/// Periodically merges remote quotes into the store
pub struct QuoteSyncService {
    store: SharedQuoteStore,
    source: Arc<dyn RemoteQuoteSource>,
    last_sync: RwLock<Option<DateTime<Utc>>>,
}

impl QuoteSyncService {
    pub fn new(store: SharedQuoteStore, source: Arc<dyn RemoteQuoteSource>) -> Self {
        Self {
            store,
            source,
            last_sync: RwLock::new(None),
        }
    }

    /// Run a single fetch-and-reconcile cycle
    ///
    /// The fetch happens without holding the store lock.
    pub async fn sync_once(&self) -> Result<SyncStats> {
        let start = Instant::now();

        let remote = self.source.fetch_quotes().await?;
        let added = {
            let mut store = self.store.lock();
            store.reconcile(&remote)?
        };

        *self.last_sync.write() = Some(Utc::now());

        let stats = SyncStats {
            fetched: remote.len(),
            added: added.len(),
            duration: start.elapsed(),
        };

        if stats.added > 0 {
            info!(
                "Sync: {} new quotes from server ({} fetched) in {:?}",
                stats.added, stats.fetched, stats.duration
            );
        } else {
            debug!("Sync: no new quotes ({} fetched)", stats.fetched);
        }

        Ok(stats)
    }

    /// Spawn the repeating reconciliation task
    ///
    /// The first cycle runs immediately. A failed cycle is logged and the
    /// next tick retries.
    pub fn start(self: Arc<Self>, interval: Duration) -> SyncHandle {
        info!("Starting background sync loop (interval: {:?})", interval);

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while flag.load(Ordering::Acquire) {
                ticker.tick().await;
                if !flag.load(Ordering::Acquire) {
                    break;
                }

                if let Err(e) = self.sync_once().await {
                    warn!("Failed to fetch quotes from server: {}", e);
                }
            }

            debug!("Background sync loop stopped");
        });

        SyncHandle { running, task }
    }

    /// Post a quote on a background task, logging the outcome
    pub fn publish_in_background(&self, quote: Quote) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            match source.publish_quote(&quote).await {
                Ok(()) => info!("Quote synced to server: {}", quote.text),
                Err(e) => warn!("Sync error: {}", e),
            }
        })
    }

    pub fn store(&self) -> &SharedQuoteStore {
        &self.store
    }

    /// Time of the last successful cycle
    pub fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.read()
    }
}

/// Cancel handle for the repeating sync task
pub struct SyncHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop the loop; an in-flight fetch is dropped
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Release);
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.task.is_finished()
    }

    /// Wait for the task to wind down after [`cancel`](Self::cancel)
    pub async fn join(self) {
        let _ = self.task.await;
    }
}
