use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    OrderId, OrderRecord, Result, StoreError,
    store::{OrderStore, UpdateGuard},
};

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
            status: row.try_get("status")?,
            payload: row.try_get("payload")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, record: OrderRecord) -> Result<()> {
        let order_id = record.order_id;

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, status, payload, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.order_id.as_uuid())
        .bind(&record.status)
        .bind(&record.payload)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Primary key violation means the order already exists
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_pkey")
            {
                return StoreError::DuplicateOrder(order_id);
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<OrderRecord> {
        let row = sqlx::query(
            r#"
            SELECT order_id, status, payload, created_at, updated_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_record(row),
            None => Err(StoreError::OrderNotFound(order_id)),
        }
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT order_id, status, payload, created_at, updated_at
            FROM orders
            WHERE status = $1
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn update(&self, mut record: OrderRecord, guard: UpdateGuard) -> Result<OrderRecord> {
        let order_id = record.order_id;

        let mut tx = self.pool.begin().await?;

        // Lock the row so the guard check and the write are atomic
        let current = sqlx::query(
            r#"
            SELECT status, created_at FROM orders
            WHERE order_id = $1
            FOR UPDATE
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Err(StoreError::OrderNotFound(order_id));
        };

        let actual: String = current.try_get("status")?;
        if let Some(ref expected) = guard.expected_status
            && actual != *expected
        {
            return Err(StoreError::StatusConflict {
                order_id,
                expected: expected.clone(),
                actual,
            });
        }

        record.created_at = current.try_get("created_at")?;
        record.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, payload = $3, updated_at = $4
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(&record.status)
        .bind(&record.payload)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }
}
