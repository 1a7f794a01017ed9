//! Domain layer for the notary order service.
//!
//! This crate provides the core order lifecycle:
//! - Order model with a stage-typed lifecycle (illegal states unrepresentable)
//! - StatusKind state machine over CREATED → SIGNED → NOTARY_ASSIGNED → COMPLETED
//! - OrderService: the single writer of order status, with guarded persistence

pub mod error;
pub mod order;

pub use error::DomainError;
pub use order::{
    ArtifactRef, Customer, Lifecycle, Order, OrderError, OrderIntake, OrderService, ServiceType,
    StatusKind, Transition, UnknownStatus,
};
