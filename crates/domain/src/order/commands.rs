//! Intake and transition requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ArtifactRef, Customer, StatusKind};

/// Intake payload for filing a new order.
///
/// `form_data` is an opaque service-specific payload (e.g., a purpose
/// statement for an affidavit); the core stores it without validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntake {
    /// Label of the requested service.
    pub service_type: String,

    /// Customer filing the order.
    pub customer: Customer,

    /// Service-specific inputs, passed through untouched.
    #[serde(default)]
    pub form_data: Map<String, Value>,
}

impl OrderIntake {
    /// Creates an intake with an empty form payload.
    pub fn new(service_type: impl Into<String>, customer: Customer) -> Self {
        Self {
            service_type: service_type.into(),
            customer,
            form_data: Map::new(),
        }
    }

    /// Attaches service-specific form data.
    pub fn with_form_data(mut self, form_data: Map<String, Value>) -> Self {
        self.form_data = form_data;
        self
    }
}

/// A requested status transition, carrying the fields the target stage needs.
#[derive(Debug, Clone)]
pub enum Transition {
    /// CREATED → SIGNED, reported by the upstream eSign step.
    Sign,

    /// SIGNED → NOTARY_ASSIGNED, stamps the assignment time.
    AssignNotary,

    /// NOTARY_ASSIGNED → COMPLETED, attaches the final document reference.
    Complete { artifact_ref: ArtifactRef },
}

impl Transition {
    /// Returns the status this transition targets.
    pub fn target(&self) -> StatusKind {
        match self {
            Transition::Sign => StatusKind::Signed,
            Transition::AssignNotary => StatusKind::NotaryAssigned,
            Transition::Complete { .. } => StatusKind::Completed,
        }
    }

    /// Returns the action name used in error messages.
    pub fn action(&self) -> &'static str {
        match self {
            Transition::Sign => "sign",
            Transition::AssignNotary => "assign notary",
            Transition::Complete { .. } => "complete",
        }
    }
}
