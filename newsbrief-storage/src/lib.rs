//! Snapshot persistence for the briefing pipeline
//!
//! Three sinks share one contract (one row per date, upsert on conflict):
//! - [`SnapshotStore`]: the SQLite store behind the persistence API server
//! - [`NewsApiClient`]: HTTP client the batch job uses to talk to that API
//! - [`FileStore`]: wholesale JSON files, the build-time alternative

pub mod api_client;
pub mod error;
pub mod file_store;
pub mod snapshot_db;

pub use api_client::NewsApiClient;
pub use error::StorageError;
pub use file_store::FileStore;
pub use snapshot_db::SnapshotStore;
