//! Order service: the status transition engine and the notary execution
//! action over any [`OrderStore`].

use chrono::Utc;
use common::OrderId;
use order_store::{OrderRecord, OrderStore, StoreError, UpdateGuard};

use crate::error::DomainError;

use super::{ArtifactRef, Order, OrderError, OrderIntake, StatusKind, Transition};

/// Service for managing the order lifecycle.
///
/// The sole writer of order status: every mutation loads the current record,
/// applies the transition on the typed model, and persists the result guarded
/// on the previously-read status. Status and its stage fields land in one
/// write; there is no window where one is updated without the other.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Files a new order in CREATED status.
    #[tracing::instrument(skip(self, intake))]
    pub async fn create_order(&self, intake: OrderIntake) -> Result<Order, DomainError> {
        let order = Order::new(OrderId::new(), intake, Utc::now())?;
        let record = OrderRecord::from_state(order.id(), order.status().as_str(), &order)?;
        self.store.insert(record).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), service_type = %order.service_type(), "order created");

        Ok(order)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let record = self.store.get(order_id).await?;
        Ok(record.decode()?)
    }

    /// Loads all orders currently holding a status.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_status(&self, status: StatusKind) -> Result<Vec<Order>, DomainError> {
        let records = self.store.list_by_status(status.as_str()).await?;
        records
            .iter()
            .map(|r| r.decode().map_err(DomainError::from))
            .collect()
    }

    /// Applies a status transition to an order.
    ///
    /// The write is guarded on the status read at the start of the call: if a
    /// concurrent writer advanced the order in between, this call loses the
    /// race and fails with the same `InvalidTransition` error an out-of-order
    /// request would get. A failed call leaves the order unchanged; callers
    /// may re-invoke.
    #[tracing::instrument(skip(self))]
    pub async fn transition(
        &self,
        order_id: OrderId,
        request: Transition,
    ) -> Result<Order, DomainError> {
        let record = self.store.get(order_id).await?;
        let mut order: Order = record.decode()?;

        let prior = order.status();
        let action = request.action();
        order.transition(request, Utc::now())?;

        let updated = OrderRecord::from_state(order.id(), order.status().as_str(), &order)?;
        match self
            .store
            .update(updated, UpdateGuard::expect_status(prior.as_str()))
            .await
        {
            Ok(_) => {
                metrics::counter!("order_transitions_total").increment(1);
                tracing::info!(
                    order_id = %order_id,
                    from = %prior,
                    to = %order.status(),
                    "order transitioned"
                );
                Ok(order)
            }
            Err(StoreError::StatusConflict {
                order_id,
                expected,
                actual,
            }) => {
                metrics::counter!("order_transition_conflicts_total").increment(1);
                tracing::warn!(order_id = %order_id, %expected, %actual, "lost transition race");
                match actual.parse::<StatusKind>() {
                    Ok(current_status) => Err(OrderError::InvalidTransition {
                        current_status,
                        action,
                    }
                    .into()),
                    Err(_) => Err(DomainError::Store(StoreError::StatusConflict {
                        order_id,
                        expected,
                        actual,
                    })),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Records the upstream eSign step for an order.
    pub async fn sign_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.transition(order_id, Transition::Sign).await
    }

    /// Hands an order to a notary, putting it on the task queue.
    pub async fn assign_notary(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.transition(order_id, Transition::AssignNotary).await
    }

    /// The notary's closing action: attach the final document reference and
    /// complete the order.
    ///
    /// Fails with `InvalidTransition` unless the order is currently
    /// NOTARY_ASSIGNED, which guards against double execution. On success the
    /// order stops appearing on the task queue as a derived consequence of
    /// its status change.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        order_id: OrderId,
        artifact_ref: ArtifactRef,
    ) -> Result<Order, DomainError> {
        self.transition(order_id, Transition::Complete { artifact_ref })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Customer;
    use order_store::InMemoryOrderStore;

    fn intake() -> OrderIntake {
        OrderIntake::new("Rental Agreement", Customer::new("Rahul Sharma"))
    }

    fn artifact(reference: &str) -> ArtifactRef {
        ArtifactRef::new(reference).unwrap()
    }

    #[tokio::test]
    async fn test_create_order() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let order = service.create_order(intake()).await.unwrap();

        assert_eq!(order.status(), StatusKind::Created);
        let loaded = service.get_order(order.id()).await.unwrap();
        assert_eq!(loaded, order);
    }

    #[tokio::test]
    async fn test_create_order_validates_intake() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let result = service
            .create_order(OrderIntake::new("", Customer::new("Rahul Sharma")))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ServiceTypeRequired))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let result = service.get_order(OrderId::new()).await;
        assert!(matches!(result, Err(DomainError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();

        let order = service.sign_order(order.id()).await.unwrap();
        assert_eq!(order.status(), StatusKind::Signed);

        let order = service.assign_notary(order.id()).await.unwrap();
        assert_eq!(order.status(), StatusKind::NotaryAssigned);
        assert!(order.assigned_at().is_some());

        let order = service.execute(order.id(), artifact("doc-ref-123")).await.unwrap();
        assert_eq!(order.status(), StatusKind::Completed);
        assert_eq!(order.final_artifact_ref().unwrap().as_str(), "doc-ref-123");
    }

    #[tokio::test]
    async fn test_transition_persists_stage_fields_atomically() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();
        service.assign_notary(order.id()).await.unwrap();

        // A reload sees the status and its stamp together
        let loaded = service.get_order(order.id()).await.unwrap();
        assert_eq!(loaded.status(), StatusKind::NotaryAssigned);
        assert!(loaded.assigned_at().is_some());
    }

    #[tokio::test]
    async fn test_repeated_transition_rejected() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();

        let result = service.sign_order(order.id()).await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::InvalidTransition {
                current_status: StatusKind::Signed,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_no_lateral_move_from_completed() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();
        service.assign_notary(order.id()).await.unwrap();
        service.execute(order.id(), artifact("doc-ref-123")).await.unwrap();

        let result = service.assign_notary(order.id()).await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::InvalidTransition {
                current_status: StatusKind::Completed,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_double_execute_rejected() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();
        service.assign_notary(order.id()).await.unwrap();

        service.execute(order.id(), artifact("doc-ref-123")).await.unwrap();
        let result = service.execute(order.id(), artifact("doc-ref-456")).await;

        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::InvalidTransition { .. }))
        ));

        // The first artifact survives
        let loaded = service.get_order(order.id()).await.unwrap();
        assert_eq!(loaded.final_artifact_ref().unwrap().as_str(), "doc-ref-123");
    }

    #[tokio::test]
    async fn test_concurrent_execute_exactly_one_wins() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();
        service.assign_notary(order.id()).await.unwrap();

        let (a, b) = tokio::join!(
            service.execute(order.id(), artifact("doc-ref-a")),
            service.execute(order.id(), artifact("doc-ref-b")),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);

        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(
            loser,
            Err(DomainError::Order(OrderError::InvalidTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn test_execute_missing_order() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let result = service.execute(OrderId::new(), artifact("doc-ref-123")).await;
        assert!(matches!(result, Err(DomainError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let first = service.create_order(intake()).await.unwrap();
        let second = service.create_order(intake()).await.unwrap();
        service.sign_order(second.id()).await.unwrap();

        let created = service.list_by_status(StatusKind::Created).await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id(), first.id());

        let completed = service.list_by_status(StatusKind::Completed).await.unwrap();
        assert!(completed.is_empty());
    }

    #[tokio::test]
    async fn test_failed_complete_leaves_status_unchanged() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let order = service.create_order(intake()).await.unwrap();
        service.sign_order(order.id()).await.unwrap();

        // Not yet assigned, so completing is out of order
        let result = service.execute(order.id(), artifact("doc-ref-123")).await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::InvalidTransition { .. }))
        ));

        let loaded = service.get_order(order.id()).await.unwrap();
        assert_eq!(loaded.status(), StatusKind::Signed);
        assert!(loaded.final_artifact_ref().is_none());
    }
}
