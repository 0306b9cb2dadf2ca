//! Per-collection listeners feeding the event processor.
//!
//! One task per watched collection consumes its change batches. Within a
//! batch every qualifying change runs in its own spawned task; records share
//! no state, so they may overlap in flight. A failure or panic in one change
//! never aborts its siblings, and one collection's stream dying never stops
//! the other's.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::models::{ChangeBatch, ChangeType, CollectionKind};
use crate::services::event_service::EventProcessor;
use crate::store::ChangeSource;

/// Spawn one listener task per watched collection
pub fn spawn_listeners(
    source: &dyn ChangeSource,
    processor: Arc<EventProcessor>,
) -> Vec<JoinHandle<()>> {
    CollectionKind::ALL
        .iter()
        .map(|&kind| {
            let mut rx = source.subscribe(kind);
            let processor = Arc::clone(&processor);
            tokio::spawn(async move {
                info!("Listening on {}", kind.collection_name());
                while let Some(batch) = rx.recv().await {
                    handle_batch(&processor, batch).await;
                }
                warn!("{} change stream closed", kind.collection_name());
            })
        })
        .collect()
}

/// Fan one batch out to the processor.
///
/// Filters to `Added`/`Modified` changes (deletions never notify) and awaits
/// all spawned per-change tasks so errors are logged batch by batch.
pub async fn handle_batch(processor: &Arc<EventProcessor>, batch: ChangeBatch) {
    let kind = batch.kind;
    let mut handles = Vec::new();

    for event in batch.events {
        if !matches!(event.change_type, ChangeType::Added | ChangeType::Modified) {
            continue;
        }
        let processor = Arc::clone(processor);
        handles.push(tokio::spawn(async move {
            match processor
                .on_change(&event.record, &event.record_id, kind)
                .await
            {
                Ok(outcome) => debug!(
                    "{} {}: {:?}",
                    kind.collection_name(),
                    event.record_id,
                    outcome
                ),
                Err(e) => error!(
                    "Error processing event {} in {}: {}",
                    event.record_id,
                    kind.collection_name(),
                    e
                ),
            }
        }));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            error!("{} change task aborted: {}", kind.collection_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::api::Notifier;
    use crate::models::{ChangeEvent, Manager, RequestRecord, Status};
    use crate::store::{RecordStore, StoreError};

    #[derive(Default)]
    struct FakeStore {
        managers: Vec<Manager>,
        confirmed: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl RecordStore for FakeStore {
        async fn managers_by_method(&self, method: &str) -> Result<Vec<Manager>, StoreError> {
            Ok(self
                .managers
                .iter()
                .filter(|m| m.payment == method)
                .cloned()
                .collect())
        }

        async fn confirm_notified(
            &self,
            _kind: CollectionKind,
            record_id: &str,
            status: Status,
        ) -> Result<bool, StoreError> {
            self.confirmed
                .lock()
                .unwrap()
                .insert(record_id.to_string(), status.as_str().to_string());
            Ok(true)
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn send_message(&self, chat_id: &str, _text: &str) -> bool {
            self.sent.lock().unwrap().push(chat_id.to_string());
            true
        }
    }

    fn event(change_type: ChangeType, id: &str, value: serde_json::Value) -> ChangeEvent {
        ChangeEvent {
            change_type,
            record_id: id.to_string(),
            record: RequestRecord::from_value(value),
        }
    }

    fn wired() -> (Arc<FakeStore>, Arc<FakeNotifier>, Arc<EventProcessor>) {
        let store = Arc::new(FakeStore {
            managers: vec![Manager {
                id: "m1".to_string(),
                payment: "bKash".to_string(),
                chat_id: Some("777".to_string()),
            }],
            ..Default::default()
        });
        let notifier = Arc::new(FakeNotifier::default());
        let processor = Arc::new(EventProcessor::new(store.clone(), notifier.clone()));
        (store, notifier, processor)
    }

    #[tokio::test]
    async fn test_removed_changes_never_notify() {
        let (store, notifier, processor) = wired();
        let batch = ChangeBatch {
            kind: CollectionKind::Deposit,
            events: vec![event(
                ChangeType::Removed,
                "gone",
                json!({"status": "approved", "method": "bKash"}),
            )],
        };

        handle_batch(&processor, batch).await;

        assert!(notifier.sent.lock().unwrap().is_empty());
        assert!(store.confirmed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_bad_change_does_not_abort_siblings() {
        let (store, notifier, processor) = wired();
        let batch = ChangeBatch {
            kind: CollectionKind::Withdraw,
            events: vec![
                // Ineligible: no method at all
                event(ChangeType::Added, "broken", json!({"status": "approved"})),
                // Routing miss for its sibling
                event(
                    ChangeType::Modified,
                    "unrouted",
                    json!({"status": "pending", "method": "Upay", "amount": 1}),
                ),
                // This one must still go through
                event(
                    ChangeType::Added,
                    "good",
                    json!({"status": "approved", "method": "bKash", "amount": 9}),
                ),
            ],
        };

        handle_batch(&processor, batch).await;

        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
        let confirmed = store.confirmed.lock().unwrap();
        assert_eq!(confirmed.get("good").map(String::as_str), Some("approved"));
        assert!(!confirmed.contains_key("broken"));
        assert!(!confirmed.contains_key("unrouted"));
    }

    #[tokio::test]
    async fn test_all_qualifying_changes_in_a_batch_are_processed() {
        let (store, notifier, processor) = wired();
        let events = (0..5)
            .map(|i| {
                event(
                    if i % 2 == 0 { ChangeType::Added } else { ChangeType::Modified },
                    &format!("rec-{}", i),
                    json!({"status": "pending", "method": "bKash", "amount": i}),
                )
            })
            .collect();

        handle_batch(
            &processor,
            ChangeBatch {
                kind: CollectionKind::Deposit,
                events,
            },
        )
        .await;

        assert_eq!(notifier.sent.lock().unwrap().len(), 5);
        assert_eq!(store.confirmed.lock().unwrap().len(), 5);
    }
}
