//! The event processor: the only stateful, decision-making piece of the
//! pipeline. Everything it touches is injected, so the whole flow runs
//! against in-memory fakes in the tests below.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::api::Notifier;
use crate::models::{CollectionKind, RequestRecord, Status};
use crate::services::{message_service, router_service};
use crate::store::RecordStore;

/// What one change event amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Delivered and watermark advanced
    Notified,
    /// Dedup/eligibility guard: nothing to do
    Ineligible,
    /// No manager routes this payment method
    NoManager,
    /// Transport reported failure; watermark untouched
    DeliveryFailed,
    /// A concurrent processor advanced the watermark first
    SupersededRace,
}

pub struct EventProcessor {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl EventProcessor {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Process one change event end to end.
    ///
    /// Idempotent per `(record, status)`: the watermark guard skips records
    /// whose current status was already reported, and the conditional
    /// watermark write refuses to land twice. The watermark only ever
    /// advances after the transport confirmed delivery.
    pub async fn on_change(
        &self,
        record: &RequestRecord,
        record_id: &str,
        kind: CollectionKind,
    ) -> Result<ProcessOutcome, String> {
        let status = match record.status() {
            Some(status) => status,
            None => return Ok(ProcessOutcome::Ineligible),
        };
        let method = match record.method() {
            Some(method) => method.to_string(),
            None => return Ok(ProcessOutcome::Ineligible),
        };
        if record.notified() == Some(status.as_str()) {
            return Ok(ProcessOutcome::Ineligible);
        }

        let destination =
            match router_service::resolve_destination(self.store.as_ref(), &method).await? {
                Some(destination) => destination,
                None => return Ok(ProcessOutcome::NoManager),
            };

        let text = message_service::format_notification(kind, status, record, record_id, &destination);

        if !self.notifier.send_message(&destination, &text).await {
            debug!(
                "Delivery failed for {} [{}], watermark untouched",
                record_id, status
            );
            return Ok(ProcessOutcome::DeliveryFailed);
        }

        match self.store.confirm_notified(kind, record_id, status).await {
            Ok(true) => {
                info!("Notification updated for {} [{}]", record_id, status);
                Ok(ProcessOutcome::Notified)
            }
            Ok(false) => {
                debug!(
                    "Watermark for {} already at {}, duplicate write suppressed",
                    record_id, status
                );
                Ok(ProcessOutcome::SupersededRace)
            }
            Err(e) => {
                // The dangerous case: the message went out but the dedup
                // marker did not persist, so the next matching change may
                // deliver a duplicate.
                error!(
                    "Watermark write failed for {} [{}] after successful delivery: {}",
                    record_id, status, e
                );
                Err(format!("Watermark write failed: {}", e))
            }
        }
    }
}
