//! Order model implementation.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    ArtifactRef, Customer, Lifecycle, OrderError, OrderIntake, ServiceType, StatusKind, Transition,
};

/// A customer's request for a document-based legal service, tracked through
/// its lifecycle.
///
/// Identity, service type, customer, form data and creation time are fixed at
/// intake; only the lifecycle moves, and only forward. The lifecycle variant
/// carries the stage-specific fields, so an order can never hold an artifact
/// reference without being COMPLETED or an assignment time before
/// NOTARY_ASSIGNED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Label of the requested service.
    service_type: ServiceType,

    /// Customer who filed the order.
    customer: Customer,

    /// Opaque service-specific payload.
    #[serde(default)]
    form_data: Map<String, Value>,

    /// Current lifecycle stage with its stage-specific fields.
    #[serde(flatten)]
    lifecycle: Lifecycle,

    /// When the order was filed.
    created_at: DateTime<Utc>,
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the requested service type.
    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    /// Returns the customer.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Returns the service-specific form payload.
    pub fn form_data(&self) -> &Map<String, Value> {
        &self.form_data
    }

    /// Returns the current status.
    pub fn status(&self) -> StatusKind {
        self.lifecycle.kind()
    }

    /// Returns the full lifecycle stage.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Returns when the notary was assigned, if assigned.
    pub fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.assigned_at()
    }

    /// Returns the final artifact reference, if completed.
    pub fn final_artifact_ref(&self) -> Option<&ArtifactRef> {
        self.lifecycle.artifact_ref()
    }

    /// Returns when the order was filed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

// Lifecycle methods
impl Order {
    /// Files a new order from an intake payload.
    ///
    /// Validates the required fields (service type, customer name); the form
    /// payload is stored untouched.
    pub fn new(
        id: OrderId,
        intake: OrderIntake,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let service_type = ServiceType::new(intake.service_type)?;
        intake.customer.validate()?;

        Ok(Self {
            id,
            service_type,
            customer: intake.customer,
            form_data: intake.form_data,
            lifecycle: Lifecycle::Created,
            created_at,
        })
    }

    /// Records the upstream eSign step.
    pub fn sign(&mut self) -> Result<(), OrderError> {
        if !self.status().can_sign() {
            return Err(OrderError::InvalidTransition {
                current_status: self.status(),
                action: "sign",
            });
        }
        self.lifecycle = Lifecycle::Signed;
        Ok(())
    }

    /// Hands the order to a notary, stamping the assignment time.
    pub fn assign_notary(&mut self, assigned_at: DateTime<Utc>) -> Result<(), OrderError> {
        if !self.status().can_assign_notary() {
            return Err(OrderError::InvalidTransition {
                current_status: self.status(),
                action: "assign notary",
            });
        }
        self.lifecycle = Lifecycle::NotaryAssigned { assigned_at };
        Ok(())
    }

    /// Closes the order with the final document reference.
    ///
    /// The assignment time carries over from the NOTARY_ASSIGNED stage.
    pub fn complete(&mut self, artifact_ref: ArtifactRef) -> Result<(), OrderError> {
        match &self.lifecycle {
            Lifecycle::NotaryAssigned { assigned_at } => {
                self.lifecycle = Lifecycle::Completed {
                    assigned_at: *assigned_at,
                    artifact_ref,
                };
                Ok(())
            }
            _ => Err(OrderError::InvalidTransition {
                current_status: self.status(),
                action: "complete",
            }),
        }
    }

    /// Applies a transition request.
    pub fn transition(&mut self, request: Transition, now: DateTime<Utc>) -> Result<(), OrderError> {
        match request {
            Transition::Sign => self.sign(),
            Transition::AssignNotary => self.assign_notary(now),
            Transition::Complete { artifact_ref } => self.complete(artifact_ref),
        }
    }
}
