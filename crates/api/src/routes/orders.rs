//! Order intake, lookup and status transition endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use common::OrderId;
use domain::{
    ArtifactRef, Customer, Order, OrderIntake, OrderService, StatusKind, Transition,
};
use order_store::OrderStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use worklist::{NotaryWorklist, StatusOverview};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub order_service: OrderService<S>,
    pub worklist: NotaryWorklist<S>,
    pub overview: StatusOverview<S>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub service_type: Option<String>,
    pub customer: Option<CustomerRequest>,
    #[serde(default)]
    pub form_data: Map<String, Value>,
}

#[derive(Deserialize, Default)]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub target_status: Option<String>,
    pub final_artifact_ref: Option<String>,
}

#[derive(Deserialize)]
pub struct ExecuteRequest {
    pub final_artifact_ref: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub service_type: String,
    pub customer: Customer,
    pub form_data: Map<String, Value>,
    pub status: String,
    pub assigned_at: Option<String>,
    pub final_artifact_ref: Option<String>,
    pub created_at: String,
}

impl OrderResponse {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            service_type: order.service_type().as_str().to_string(),
            customer: order.customer().clone(),
            form_data: order.form_data().clone(),
            status: order.status().to_string(),
            assigned_at: order.assigned_at().map(|t| t.to_rfc3339()),
            final_artifact_ref: order.final_artifact_ref().map(|a| a.as_str().to_string()),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /orders — file a new service request.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderResponse>), ApiError> {
    // Missing fields fall through as empty values so the domain's intake
    // validation produces the error message.
    let customer_req = req.customer.unwrap_or_default();
    let mut customer = Customer::new(customer_req.name.unwrap_or_default());
    customer.email = customer_req.email;
    customer.phone = customer_req.phone;

    let intake = OrderIntake::new(req.service_type.unwrap_or_default(), customer)
        .with_form_data(req.form_data);

    let order = state.order_service.create_order(intake).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(OrderResponse::from_order(&order)),
    ))
}

/// GET /orders?status=… — list orders holding a status.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let Some(ref status) = query.status else {
        return Err(ApiError::BadRequest(
            "status query parameter is required".to_string(),
        ));
    };
    let status: StatusKind = status
        .parse()
        .map_err(|e: domain::UnknownStatus| ApiError::BadRequest(e.to_string()))?;

    let orders = state.order_service.list_by_status(status).await?;
    Ok(Json(orders.iter().map(OrderResponse::from_order).collect()))
}

/// GET /orders/:id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.order_service.get_order(order_id).await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// PUT /orders/:id/status — apply a status transition.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;

    let Some(ref target) = req.target_status else {
        return Err(ApiError::BadRequest("target_status is required".to_string()));
    };
    let target: StatusKind = target
        .parse()
        .map_err(|e: domain::UnknownStatus| ApiError::BadRequest(e.to_string()))?;

    let transition = match target {
        StatusKind::Created => {
            return Err(ApiError::Conflict(
                "no transition targets CREATED status".to_string(),
            ));
        }
        StatusKind::Signed => Transition::Sign,
        StatusKind::NotaryAssigned => Transition::AssignNotary,
        StatusKind::Completed => Transition::Complete {
            artifact_ref: ArtifactRef::new(req.final_artifact_ref.unwrap_or_default())?,
        },
    };

    let order = state.order_service.transition(order_id, transition).await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// POST /orders/:id/execute — the notary's closing action.
#[tracing::instrument(skip(state, req))]
pub async fn execute<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let artifact_ref = ArtifactRef::new(req.final_artifact_ref.unwrap_or_default())?;

    let order = state.order_service.execute(order_id, artifact_ref).await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(OrderId::from(uuid))
}
