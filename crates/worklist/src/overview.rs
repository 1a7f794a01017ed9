//! Per-status order counts for the admin dashboard.

use domain::StatusKind;
use order_store::{OrderStore, OrderStoreExt};
use serde::Serialize;

use crate::Result;

/// Order counts per lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub created: usize,
    pub signed: usize,
    pub notary_assigned: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Total number of orders across all statuses.
    pub fn total(&self) -> usize {
        self.created + self.signed + self.notary_assigned + self.completed
    }
}

/// Status overview, derived from the store at call time.
pub struct StatusOverview<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> StatusOverview<S> {
    /// Creates an overview over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Counts orders in each lifecycle status.
    #[tracing::instrument(skip(self))]
    pub async fn counts(&self) -> Result<StatusCounts> {
        Ok(StatusCounts {
            created: self
                .store
                .count_by_status(StatusKind::Created.as_str())
                .await?,
            signed: self
                .store
                .count_by_status(StatusKind::Signed.as_str())
                .await?,
            notary_assigned: self
                .store
                .count_by_status(StatusKind::NotaryAssigned.as_str())
                .await?,
            completed: self
                .store
                .count_by_status(StatusKind::Completed.as_str())
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ArtifactRef, Customer, OrderIntake, OrderService};
    use order_store::InMemoryOrderStore;

    #[tokio::test]
    async fn counts_follow_the_lifecycle() {
        let store = InMemoryOrderStore::new();
        let service = OrderService::new(store.clone());
        let overview = StatusOverview::new(store);

        let intake = OrderIntake::new("Affidavit", Customer::new("Rahul Sharma"));
        let first = service.create_order(intake.clone()).await.unwrap();
        let second = service.create_order(intake).await.unwrap();

        let counts = overview.counts().await.unwrap();
        assert_eq!(counts.created, 2);
        assert_eq!(counts.total(), 2);

        service.sign_order(first.id()).await.unwrap();
        service.assign_notary(first.id()).await.unwrap();
        service
            .execute(first.id(), ArtifactRef::new("doc-ref-123").unwrap())
            .await
            .unwrap();
        service.sign_order(second.id()).await.unwrap();

        let counts = overview.counts().await.unwrap();
        assert_eq!(counts.created, 0);
        assert_eq!(counts.signed, 1);
        assert_eq!(counts.notary_assigned, 0);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.total(), 2);
    }
}
