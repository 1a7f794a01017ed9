use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    OrderId, OrderRecord, Result, StoreError,
    store::{OrderStore, UpdateGuard},
};

/// In-memory order store implementation.
///
/// Used by tests and the default server binary. Provides the same interface
/// and guard semantics as the PostgreSQL implementation; the guard check and
/// the write happen under a single write lock, so guarded updates are atomic.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, record: OrderRecord) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&record.order_id) {
            return Err(StoreError::DuplicateOrder(record.order_id));
        }
        orders.insert(record.order_id, record);
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<OrderRecord> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(order_id))
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<OrderRecord>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn update(&self, mut record: OrderRecord, guard: UpdateGuard) -> Result<OrderRecord> {
        let mut orders = self.orders.write().await;

        let existing = orders
            .get(&record.order_id)
            .ok_or(StoreError::OrderNotFound(record.order_id))?;

        if let Some(ref expected) = guard.expected_status
            && existing.status != *expected
        {
            return Err(StoreError::StatusConflict {
                order_id: record.order_id,
                expected: expected.clone(),
                actual: existing.status.clone(),
            });
        }

        record.created_at = existing.created_at;
        record.updated_at = Utc::now();
        orders.insert(record.order_id, record.clone());

        Ok(record)
    }
}
