use tracing::warn;

use crate::store::RecordStore;

/// Resolve the destination chat for a payment method.
///
/// `Ok(None)` covers both routing misses: no manager registered for the
/// method, or a manager without a chat id. Neither is fatal; the caller
/// drops the event and the next change re-attempts routing. When several
/// managers share a method the one with the lexicographically smallest id
/// wins, sorted here so fake stores behave like the SQL ordering.
pub async fn resolve_destination(
    store: &dyn RecordStore,
    method: &str,
) -> Result<Option<String>, String> {
    let mut managers = store
        .managers_by_method(method)
        .await
        .map_err(|e| format!("Manager lookup failed: {}", e))?;

    if managers.is_empty() {
        warn!("No manager found for method: {}", method);
        return Ok(None);
    }

    managers.sort_by(|a, b| a.id.cmp(&b.id));
    let manager = &managers[0];

    match manager.chat_id.as_deref() {
        Some(chat_id) if !chat_id.is_empty() => Ok(Some(chat_id.to_string())),
        _ => {
            warn!("Manager {} for method {} has no chat id", manager.id, method);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::models::{CollectionKind, Manager, Status};
    use crate::store::StoreError;

    struct FakeRegistry {
        managers: Vec<Manager>,
    }

    #[async_trait]
    impl RecordStore for FakeRegistry {
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
            _record_id: &str,
            _status: Status,
        ) -> Result<bool, StoreError> {
            unreachable!("router never writes")
        }
    }

    fn manager(id: &str, payment: &str, chat_id: Option<&str>) -> Manager {
        Manager {
            id: id.to_string(),
            payment: payment.to_string(),
            chat_id: chat_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_resolves_registered_method() {
        let registry = FakeRegistry {
            managers: vec![manager("m1", "bKash", Some("777"))],
        };
        let dest = resolve_destination(&registry, "bKash").await.unwrap();
        assert_eq!(dest, Some("777".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_method_is_a_miss() {
        let registry = FakeRegistry { managers: vec![] };
        let dest = resolve_destination(&registry, "Nagad").await.unwrap();
        assert_eq!(dest, None);
    }

    #[tokio::test]
    async fn test_manager_without_chat_id_is_a_miss() {
        let registry = FakeRegistry {
            managers: vec![manager("m1", "bKash", None)],
        };
        assert_eq!(resolve_destination(&registry, "bKash").await.unwrap(), None);

        let registry = FakeRegistry {
            managers: vec![manager("m1", "bKash", Some(""))],
        };
        assert_eq!(resolve_destination(&registry, "bKash").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tie_break_is_smallest_manager_id() {
        let registry = FakeRegistry {
            managers: vec![
                manager("m9", "bKash", Some("999")),
                manager("m2", "bKash", Some("222")),
                manager("m5", "bKash", Some("555")),
            ],
        };
        let dest = resolve_destination(&registry, "bKash").await.unwrap();
        assert_eq!(dest, Some("222".to_string()));
    }
}
