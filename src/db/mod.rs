use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use crate::models::{CollectionKind, Manager, Status};
use crate::store::{RecordStore, StoreError};

pub mod managers;
pub mod records;
pub mod watch;

/// Initialize the MySQL connection pool and create tables
pub async fn init_db() -> Result<MySqlPool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL not set in .env file");

    let pool = MySqlPool::connect(&database_url).await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create all database tables
async fn create_tables(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for kind in CollectionKind::ALL {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id VARCHAR(64) PRIMARY KEY,
                data JSON NOT NULL,
                notified VARCHAR(16) NULL
            )",
            kind.table_name()
        ))
        .execute(pool)
        .await?;
    }

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS managers (
            id VARCHAR(64) PRIMARY KEY,
            payment VARCHAR(64) NOT NULL,
            chat_id VARCHAR(64) NULL,
            INDEX idx_managers_payment (payment)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Storage handle implementing the consumed interfaces over MySQL
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn managers_by_method(&self, method: &str) -> Result<Vec<Manager>, StoreError> {
        managers::get_managers_by_payment(&self.pool, method).await
    }

    async fn confirm_notified(
        &self,
        kind: CollectionKind,
        record_id: &str,
        status: Status,
    ) -> Result<bool, StoreError> {
        records::confirm_notified(&self.pool, kind, record_id, status).await
    }
}
