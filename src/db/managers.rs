use sqlx::mysql::MySqlPool;

use crate::models::Manager;
use crate::store::StoreError;

/// Get all managers registered for a payment method, smallest id first
pub async fn get_managers_by_payment(
    pool: &MySqlPool,
    method: &str,
) -> Result<Vec<Manager>, StoreError> {
    let rows = sqlx::query_as::<_, (String, String, Option<String>)>(
        "SELECT id, payment, chat_id FROM managers WHERE payment = ? ORDER BY id",
    )
    .bind(method)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, payment, chat_id)| Manager {
            id,
            payment,
            chat_id,
        })
        .collect())
}
