//! Read-side views over the order store.
//!
//! This crate provides the query side of the service:
//! - [`NotaryWorklist`] — the notary's pending task queue
//! - [`StatusOverview`] — per-status order counts for the admin dashboard
//!
//! Views hold no state of their own: every call re-reads the store, since
//! orders can be concurrently assigned or executed by other actors.

pub mod error;
pub mod overview;
pub mod queue;

pub use error::{Result, WorklistError};
pub use overview::{StatusCounts, StatusOverview};
pub use queue::{NotaryWorklist, PendingTask};
