//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency and truncate
//! the orders table between tests, so they run serialized. Run with:
//!
//! ```bash
//! cargo test -p order-store --test postgres_integration
//! ```

use std::sync::Arc;

use order_store::{
    OrderId, OrderRecord, OrderStore, PostgresOrderStore, StoreError, UpdateGuard,
};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for the schema
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!("../../../migrations/001_create_orders_table.sql"))
                .execute(&temp_pool)
                .await
                .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and a cleared table
async fn get_test_store() -> PostgresOrderStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE orders")
        .execute(&pool)
        .await
        .unwrap();

    PostgresOrderStore::new(pool)
}

fn create_record(status: &str) -> OrderRecord {
    OrderRecord::new(
        OrderId::new(),
        status,
        serde_json::json!({"service_type": "Rental Agreement"}),
    )
}

#[tokio::test]
#[serial]
async fn insert_and_get_record() {
    let store = get_test_store().await;
    let record = create_record("CREATED");
    let order_id = record.order_id;

    store.insert(record).await.unwrap();

    let fetched = store.get(order_id).await.unwrap();
    assert_eq!(fetched.order_id, order_id);
    assert_eq!(fetched.status, "CREATED");
    assert_eq!(fetched.payload["service_type"], "Rental Agreement");
}

#[tokio::test]
#[serial]
async fn get_missing_returns_not_found() {
    let store = get_test_store().await;

    let result = store.get(OrderId::new()).await;
    assert!(matches!(result, Err(StoreError::OrderNotFound(_))));
}

#[tokio::test]
#[serial]
async fn duplicate_insert_rejected() {
    let store = get_test_store().await;
    let record = create_record("CREATED");

    store.insert(record.clone()).await.unwrap();
    let result = store.insert(record).await;

    assert!(matches!(result, Err(StoreError::DuplicateOrder(_))));
}

#[tokio::test]
#[serial]
async fn list_by_status_filters_exactly() {
    let store = get_test_store().await;

    store.insert(create_record("CREATED")).await.unwrap();
    store.insert(create_record("NOTARY_ASSIGNED")).await.unwrap();
    store.insert(create_record("NOTARY_ASSIGNED")).await.unwrap();

    let assigned = store.list_by_status("NOTARY_ASSIGNED").await.unwrap();
    assert_eq!(assigned.len(), 2);

    let completed = store.list_by_status("COMPLETED").await.unwrap();
    assert!(completed.is_empty());
}

#[tokio::test]
#[serial]
async fn guarded_update_succeeds_on_matching_status() {
    let store = get_test_store().await;
    let record = create_record("CREATED");
    let order_id = record.order_id;
    store.insert(record.clone()).await.unwrap();

    let mut updated = record;
    updated.status = "SIGNED".to_string();
    let stored = store
        .update(updated, UpdateGuard::expect_status("CREATED"))
        .await
        .unwrap();

    assert_eq!(stored.status, "SIGNED");
    assert_eq!(store.get(order_id).await.unwrap().status, "SIGNED");
}

#[tokio::test]
#[serial]
async fn guarded_update_conflicts_on_stale_status() {
    let store = get_test_store().await;
    let record = create_record("SIGNED");
    let order_id = record.order_id;
    store.insert(record.clone()).await.unwrap();

    let mut updated = record;
    updated.status = "NOTARY_ASSIGNED".to_string();
    let result = store
        .update(updated, UpdateGuard::expect_status("CREATED"))
        .await;

    assert!(matches!(result, Err(StoreError::StatusConflict { .. })));
    // Record unchanged
    assert_eq!(store.get(order_id).await.unwrap().status, "SIGNED");
}

#[tokio::test]
#[serial]
async fn update_missing_returns_not_found() {
    let store = get_test_store().await;
    let record = create_record("CREATED");

    let result = store.update(record, UpdateGuard::new()).await;
    assert!(matches!(result, Err(StoreError::OrderNotFound(_))));
}

#[tokio::test]
#[serial]
async fn update_preserves_created_at() {
    let store = get_test_store().await;
    let record = create_record("CREATED");
    store.insert(record.clone()).await.unwrap();
    let created_at = store.get(record.order_id).await.unwrap().created_at;

    let mut updated = record;
    updated.status = "SIGNED".to_string();
    let stored = store.update(updated, UpdateGuard::new()).await.unwrap();

    assert_eq!(stored.created_at, created_at);
    assert!(stored.updated_at >= stored.created_at);
}
