//! Notary task queue view.

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Order, StatusKind};
use order_store::OrderStore;
use serde::Serialize;

use crate::Result;

/// A pending task as shown to the notary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingTask {
    pub order_id: OrderId,
    pub service_type: String,
    pub customer_name: String,
    pub assigned_at: DateTime<Utc>,
}

impl PendingTask {
    fn from_order(order: &Order) -> Option<Self> {
        Some(Self {
            order_id: order.id(),
            service_type: order.service_type().as_str().to_string(),
            customer_name: order.customer().name.clone(),
            assigned_at: order.assigned_at()?,
        })
    }
}

/// The notary's pending work queue, derived from the store at call time.
///
/// Purely a query: an order enters the queue when its status becomes
/// NOTARY_ASSIGNED and leaves it when execution completes the order, with no
/// separate bookkeeping here.
pub struct NotaryWorklist<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> NotaryWorklist<S> {
    /// Creates a worklist over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all orders awaiting notary execution, oldest assignment first
    /// (order ID as the tiebreaker, for a stable order).
    #[tracing::instrument(skip(self))]
    pub async fn pending_tasks(&self) -> Result<Vec<PendingTask>> {
        let records = self
            .store
            .list_by_status(StatusKind::NotaryAssigned.as_str())
            .await?;

        let mut tasks = Vec::with_capacity(records.len());
        for record in &records {
            let order: Order = record.decode()?;
            match PendingTask::from_order(&order) {
                Some(task) => tasks.push(task),
                // A record listed under NOTARY_ASSIGNED must carry its
                // assignment stamp; skip and flag anything that doesn't.
                None => {
                    tracing::warn!(order_id = %order.id(), "assigned order without assignment stamp")
                }
            }
        }

        tasks.sort_by(|a, b| {
            a.assigned_at
                .cmp(&b.assigned_at)
                .then(a.order_id.cmp(&b.order_id))
        });

        metrics::counter!("worklist_reads_total").increment(1);
        Ok(tasks)
    }
}
