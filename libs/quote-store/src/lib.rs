//! Quote store
//!
//! An ordered quote collection persisted to a long-lived key-value store,
//! with a session slot for the last displayed quote and a background task
//! that merges quotes from a remote source.

pub mod config;
pub mod logging;
pub mod quote;
pub mod remote;
pub mod shutdown;
pub mod storage;
pub mod store;
pub mod sync;

// Re-export main types
pub use config::{ConfigError, QuoteConfig};
pub use logging::init_tracing;
pub use quote::{seed_quotes, Quote, ALL_CATEGORIES, SERVER_CATEGORY};
pub use remote::{HttpQuoteSource, RemoteError, RemoteQuoteSource};
pub use shutdown::ShutdownManager;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{Pick, QuoteStore, StoreError};
pub use sync::{QuoteSyncService, SharedQuoteStore, SyncError, SyncHandle, SyncStats};
