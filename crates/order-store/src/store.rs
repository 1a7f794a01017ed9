use async_trait::async_trait;

use crate::{OrderId, OrderRecord, Result, StoreError};

/// Guard conditions for updating a record.
#[derive(Debug, Clone, Default)]
pub struct UpdateGuard {
    /// Expected current status of the record.
    /// If None, no status check is performed (use with caution).
    pub expected_status: Option<String>,
}

impl UpdateGuard {
    /// Creates a guard with no status check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a guard expecting the record to currently hold a specific status.
    ///
    /// The update fails with [`StoreError::StatusConflict`] if another writer
    /// changed the status between the caller's read and this write.
    pub fn expect_status(status: impl Into<String>) -> Self {
        Self {
            expected_status: Some(status.into()),
        }
    }
}

/// Core trait for order store implementations.
///
/// All implementations must be thread-safe (Send + Sync). Records are never
/// deleted; completed orders are retained as an audit trail.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new record.
    ///
    /// Fails with [`StoreError::DuplicateOrder`] if the ID is already present.
    async fn insert(&self, record: OrderRecord) -> Result<()>;

    /// Retrieves a record by order ID.
    ///
    /// Fails with [`StoreError::OrderNotFound`] if no such record exists.
    async fn get(&self, order_id: OrderId) -> Result<OrderRecord>;

    /// Retrieves all records matching exactly one status value.
    ///
    /// Returns an empty vector (not an error) when none match. No ordering
    /// is guaranteed; callers that need a stable order sort on decoded fields.
    async fn list_by_status(&self, status: &str) -> Result<Vec<OrderRecord>>;

    /// Replaces a record, atomically with its status.
    ///
    /// `created_at` is preserved from the stored record and `updated_at` is
    /// stamped by the store. If the guard names an expected status and the
    /// stored status differs, the write is rejected with
    /// [`StoreError::StatusConflict`] and nothing changes.
    ///
    /// Returns the record as stored.
    async fn update(&self, record: OrderRecord, guard: UpdateGuard) -> Result<OrderRecord>;
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Checks whether an order exists.
    async fn exists(&self, order_id: OrderId) -> Result<bool> {
        match self.get(order_id).await {
            Ok(_) => Ok(true),
            Err(StoreError::OrderNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Counts records holding a given status.
    async fn count_by_status(&self, status: &str) -> Result<usize> {
        Ok(self.list_by_status(status).await?.len())
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}
