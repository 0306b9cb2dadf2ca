use sqlx::mysql::MySqlPool;
use sqlx::types::Json;
use tracing::warn;

use crate::models::{CollectionKind, RequestRecord, Status};
use crate::store::StoreError;

/// Load the full current snapshot of every request in a collection.
///
/// The watermark column is merged into the field map so the snapshot matches
/// what the change stream delivers. Rows whose document is not a JSON object
/// are logged and skipped; one bad row must not starve the watcher.
pub async fn fetch_all(
    pool: &MySqlPool,
    kind: CollectionKind,
) -> Result<Vec<(String, RequestRecord)>, StoreError> {
    let rows = sqlx::query_as::<_, (String, Json<serde_json::Value>, Option<String>)>(&format!(
        "SELECT id, data, notified FROM {} ORDER BY id",
        kind.table_name()
    ))
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for (id, Json(data), notified) in rows {
        if !data.is_object() {
            warn!("Skipping malformed record {} in {}", id, kind.collection_name());
            continue;
        }
        let mut record = RequestRecord::from_value(data);
        if let Some(notified) = notified {
            record.set("notified", serde_json::Value::String(notified));
        }
        records.push((id, record));
    }

    Ok(records)
}

/// Conditionally set `notified = status` for one request.
///
/// The `WHERE` clause only matches while the stored watermark still differs,
/// so two processors racing on the same record cannot both claim the write.
/// Returns whether a row was actually updated.
pub async fn confirm_notified(
    pool: &MySqlPool,
    kind: CollectionKind,
    record_id: &str,
    status: Status,
) -> Result<bool, StoreError> {
    let result = sqlx::query(&format!(
        "UPDATE {} SET notified = ? WHERE id = ? AND (notified IS NULL OR notified <> ?)",
        kind.table_name()
    ))
    .bind(status.as_str())
    .bind(record_id)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
