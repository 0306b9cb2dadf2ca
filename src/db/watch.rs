//! Poll-based change stream over the request tables.
//!
//! MySQL has no push notifications, so the watcher re-reads each watched
//! table on a fixed cadence and diffs the snapshots. The first poll reports
//! every existing row as `Added`, matching the initial-snapshot semantics of
//! a real-time change stream; the dedup watermark makes the resulting
//! redelivery harmless.

use std::collections::HashMap;
use std::time::Duration;

use sqlx::mysql::MySqlPool;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::db::records;
use crate::models::{ChangeBatch, ChangeEvent, ChangeType, CollectionKind, RequestRecord};
use crate::store::ChangeSource;

pub struct PollWatcher {
    pool: MySqlPool,
    interval: Duration,
}

impl PollWatcher {
    pub fn new(pool: MySqlPool, interval: Duration) -> Self {
        Self { pool, interval }
    }
}

impl ChangeSource for PollWatcher {
    fn subscribe(&self, kind: CollectionKind) -> mpsc::Receiver<ChangeBatch> {
        let (tx, rx) = mpsc::channel(16);
        let pool = self.pool.clone();
        let interval = self.interval;
        tokio::spawn(async move {
            poll_loop(pool, kind, interval, tx).await;
        });
        rx
    }
}

async fn poll_loop(
    pool: MySqlPool,
    kind: CollectionKind,
    interval: Duration,
    tx: mpsc::Sender<ChangeBatch>,
) {
    // id -> canonical document text from the previous poll
    let mut snapshot: HashMap<String, String> = HashMap::new();

    loop {
        match records::fetch_all(&pool, kind).await {
            Ok(rows) => {
                let mut current = HashMap::with_capacity(rows.len());
                let mut events = Vec::new();

                for (id, record) in rows {
                    let fingerprint = record.fingerprint();
                    match snapshot.get(&id) {
                        None => events.push(ChangeEvent {
                            change_type: ChangeType::Added,
                            record_id: id.clone(),
                            record,
                        }),
                        Some(previous) if *previous != fingerprint => events.push(ChangeEvent {
                            change_type: ChangeType::Modified,
                            record_id: id.clone(),
                            record,
                        }),
                        Some(_) => {}
                    }
                    current.insert(id, fingerprint);
                }

                for id in snapshot.keys() {
                    if !current.contains_key(id) {
                        events.push(ChangeEvent {
                            change_type: ChangeType::Removed,
                            record_id: id.clone(),
                            record: RequestRecord::default(),
                        });
                    }
                }

                snapshot = current;

                if !events.is_empty() {
                    debug!(
                        "{}: emitting batch of {} change(s)",
                        kind.collection_name(),
                        events.len()
                    );
                    if tx.send(ChangeBatch { kind, events }).await.is_err() {
                        // Subscriber gone, subscription torn down
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("{} poll failed: {}", kind.collection_name(), e);
            }
        }

        tokio::time::sleep(interval).await;
    }
}
