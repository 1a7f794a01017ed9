//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

use super::OrderError;

/// Label of the requested service (e.g., "Rental Agreement", "Affidavit").
///
/// Free text, but never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceType(String);

impl ServiceType {
    /// Creates a service type, rejecting empty or whitespace-only labels.
    pub fn new(label: impl Into<String>) -> Result<Self, OrderError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(OrderError::ServiceTypeRequired);
        }
        Ok(Self(label))
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reference to the final notarized document.
///
/// Opaque to the core (an object-store key or external document ID), but
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// Creates an artifact reference, rejecting empty or whitespace-only values.
    pub fn new(reference: impl Into<String>) -> Result<Self, OrderError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(OrderError::ArtifactRefRequired);
        }
        Ok(Self(reference))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArtifactRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Customer contact details, set at creation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer name. Required.
    pub name: String,

    /// Contact email, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    /// Creates a customer with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the contact phone.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validates that the required fields are present.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.name.trim().is_empty() {
            return Err(OrderError::CustomerNameRequired);
        }
        Ok(())
    }
}
