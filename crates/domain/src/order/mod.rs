//! Order model and related types.

mod commands;
mod model;
mod service;
mod status;
mod value_objects;

pub use commands::{OrderIntake, Transition};
pub use model::Order;
pub use service::OrderService;
pub use status::{Lifecycle, StatusKind, UnknownStatus};
pub use value_objects::{ArtifactRef, Customer, ServiceType};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order is not in a status that allows the requested action.
    #[error("Invalid status transition: cannot {action} from {current_status} status")]
    InvalidTransition {
        current_status: StatusKind,
        action: &'static str,
    },

    /// A service type is required.
    #[error("A service type is required")]
    ServiceTypeRequired,

    /// A customer name is required.
    #[error("A customer name is required")]
    CustomerNameRequired,

    /// A final artifact reference is required to complete an order.
    #[error("A final artifact reference is required")]
    ArtifactRefRequired,
}
