pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::OrderId;
pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use record::OrderRecord;
pub use store::{OrderStore, OrderStoreExt, UpdateGuard};
