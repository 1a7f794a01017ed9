//! HTTP API server with observability for the notary order service.
//!
//! Provides REST endpoints for order intake, status transitions, the notary
//! task queue and the admin overview, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<S>))
        .route("/orders", get(routes::orders::list::<S>))
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/orders/{id}/status", put(routes::orders::update_status::<S>))
        .route("/orders/{id}/execute", post(routes::orders::execute::<S>))
        .route("/tasks", get(routes::tasks::pending::<S>))
        .route("/overview", get(routes::tasks::overview::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over a shared store.
pub fn create_default_state<S: OrderStore + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    use domain::OrderService;
    use worklist::{NotaryWorklist, StatusOverview};

    Arc::new(AppState {
        order_service: OrderService::new(store.clone()),
        worklist: NotaryWorklist::new(store.clone()),
        overview: StatusOverview::new(store),
    })
}
