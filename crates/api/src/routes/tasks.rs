//! Notary task queue and admin overview endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use order_store::OrderStore;
use worklist::{PendingTask, StatusCounts};

use crate::error::ApiError;
use crate::routes::orders::AppState;

/// GET /tasks — the notary's pending work queue, oldest assignment first.
#[tracing::instrument(skip(state))]
pub async fn pending<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<PendingTask>>, ApiError> {
    let tasks = state.worklist.pending_tasks().await?;
    Ok(Json(tasks))
}

/// GET /overview — order counts per lifecycle status.
#[tracing::instrument(skip(state))]
pub async fn overview<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<StatusCounts>, ApiError> {
    let counts = state.overview.counts().await?;
    Ok(Json(counts))
}
