//! Order status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ArtifactRef;

/// The lifecycle status of an order, as stored and sent over the wire.
///
/// Status transitions:
/// ```text
/// CREATED ──► SIGNED ──► NOTARY_ASSIGNED ──► COMPLETED
/// ```
///
/// The graph is forward-only: there is no cancellation or rejection edge,
/// and no backward or same-status transition is ever legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    /// Order was filed by the customer, awaiting the eSign step.
    #[default]
    Created,

    /// The upstream eSign step signed the order, awaiting notary assignment.
    Signed,

    /// A notary has been assigned; the order is on the task queue.
    NotaryAssigned,

    /// The notary executed the order and attached the final document
    /// (terminal status).
    Completed,
}

impl StatusKind {
    /// Returns true if the order can be signed from this status.
    pub fn can_sign(&self) -> bool {
        matches!(self, StatusKind::Created)
    }

    /// Returns true if a notary can be assigned from this status.
    pub fn can_assign_notary(&self) -> bool {
        matches!(self, StatusKind::Signed)
    }

    /// Returns true if the order can be completed from this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, StatusKind::NotaryAssigned)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusKind::Completed)
    }

    /// Returns the status name as stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Created => "CREATED",
            StatusKind::Signed => "SIGNED",
            StatusKind::NotaryAssigned => "NOTARY_ASSIGNED",
            StatusKind::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Clone, Error)]
#[error("Unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for StatusKind {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(StatusKind::Created),
            "SIGNED" => Ok(StatusKind::Signed),
            "NOTARY_ASSIGNED" => Ok(StatusKind::NotaryAssigned),
            "COMPLETED" => Ok(StatusKind::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Stage-typed order state.
///
/// Each variant carries only the fields valid for its stage: an assignment
/// timestamp exists from NOTARY_ASSIGNED on, and an artifact reference exists
/// only in COMPLETED. Illegal combinations cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lifecycle {
    /// Awaiting the eSign step.
    Created,

    /// Signed, awaiting notary assignment.
    Signed,

    /// On the notary task queue.
    NotaryAssigned {
        /// When the notary was assigned.
        assigned_at: DateTime<Utc>,
    },

    /// Executed by the notary (terminal).
    Completed {
        /// When the notary was assigned.
        assigned_at: DateTime<Utc>,
        /// Reference to the final document.
        artifact_ref: ArtifactRef,
    },
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::Created
    }
}

impl Lifecycle {
    /// Returns the fieldless status of this stage.
    pub fn kind(&self) -> StatusKind {
        match self {
            Lifecycle::Created => StatusKind::Created,
            Lifecycle::Signed => StatusKind::Signed,
            Lifecycle::NotaryAssigned { .. } => StatusKind::NotaryAssigned,
            Lifecycle::Completed { .. } => StatusKind::Completed,
        }
    }

    /// Returns when the notary was assigned, if the order has reached
    /// NOTARY_ASSIGNED.
    pub fn assigned_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::NotaryAssigned { assigned_at }
            | Lifecycle::Completed { assigned_at, .. } => Some(*assigned_at),
            _ => None,
        }
    }

    /// Returns the final artifact reference, if the order is COMPLETED.
    pub fn artifact_ref(&self) -> Option<&ArtifactRef> {
        match self {
            Lifecycle::Completed { artifact_ref, .. } => Some(artifact_ref),
            _ => None,
        }
    }
}
