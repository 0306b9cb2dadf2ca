//! Consumed storage interfaces.
//!
//! The relay never owns its data: requests and the manager registry live in
//! an external store and changes arrive over a stream. These traits are the
//! seams the services are wired against, so tests can substitute in-memory
//! fakes for the MySQL-backed implementations in `db`.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{ChangeBatch, CollectionKind, Manager, Status};

/// Storage-side failures surfaced to the event pipeline
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Malformed record {0}: {1}")]
    MalformedRecord(String, String),
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Read/write access to the record store and manager registry
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All managers registered for a payment method
    async fn managers_by_method(&self, method: &str) -> Result<Vec<Manager>, StoreError>;

    /// Conditionally advance the notification watermark: set
    /// `notified = status` only while the stored watermark still differs.
    /// Returns `false` when a concurrent processor already advanced it.
    /// This is the sole mutation the relay performs.
    async fn confirm_notified(
        &self,
        kind: CollectionKind,
        record_id: &str,
        status: Status,
    ) -> Result<bool, StoreError>;
}

/// Source of per-collection change batches.
///
/// Each call hands out an independent subscription; the stream ends when the
/// receiver is dropped.
pub trait ChangeSource {
    fn subscribe(&self, kind: CollectionKind) -> mpsc::Receiver<ChangeBatch>;
}
