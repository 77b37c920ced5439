use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::products::StorefrontProductList,
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_available_products))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products currently orderable somewhere", body = ApiResponse<StorefrontProductList>)
    ),
    tag = "Storefront"
)]
pub async fn list_available_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StorefrontProductList>>> {
    let resp = catalog_service::list_available_products(&state).await?;
    Ok(Json(resp))
}
