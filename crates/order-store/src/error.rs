use thiserror::Error;

use common::OrderId;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A guarded update found a different status than the caller expected.
    /// The record was not modified.
    #[error("Status conflict for order {order_id}: expected status {expected}, found {actual}")]
    StatusConflict {
        order_id: OrderId,
        expected: String,
        actual: String,
    },

    /// The order was not found in the store.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with this ID already exists.
    #[error("Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
