use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::orders::{OrderWithElements, RegisterOrderRequest},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = RegisterOrderRequest,
    responses(
        (status = 200, description = "Order registered", body = ApiResponse<OrderWithElements>),
        (status = 400, description = "Validation failed, field errors in data"),
        (status = 404, description = "Referenced product does not exist"),
    ),
    tag = "Storefront"
)]
pub async fn register_order(
    State(state): State<AppState>,
    Json(payload): Json<RegisterOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderWithElements>>> {
    let resp = order_service::register_order(&state, payload).await?;
    Ok(Json(resp))
}
