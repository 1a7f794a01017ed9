use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur while reading a view.
///
/// Storage failures propagate to the caller; a view never degrades to a
/// silently empty result, since an empty queue would hide pending work.
#[derive(Debug, Error)]
pub enum WorklistError {
    /// The underlying store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for view reads.
pub type Result<T> = std::result::Result<T, WorklistError>;
