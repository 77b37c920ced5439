use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    dto::staff::{
        AvailabilityGrid, CategoryList, CreateCategoryRequest, CreateRestaurantRequest,
        RestaurantList, SetAvailabilityRequest, TriageOrderList, UpdateOrderRequest,
        UpdateRestaurantRequest,
    },
    error::AppResult,
    middleware::auth::StaffUser,
    models::{Order, Product, ProductCategory, Restaurant, RestaurantMenuItem},
    response::ApiResponse,
    services::{catalog_service, menu_service, order_service, restaurant_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}", patch(update_order))
        .route("/availability", get(availability_grid))
        .route("/availability", put(set_availability))
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/{id}", patch(update_restaurant))
        .route("/restaurants/{id}", delete(delete_restaurant))
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{id}", patch(update_product))
        .route("/products/{id}", delete(delete_product))
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{id}", delete(delete_category))
}

#[utoipa::path(
    get,
    path = "/api/staff/orders",
    responses(
        (status = 200, description = "Triage list with costs and ranked candidate restaurants", body = ApiResponse<TriageOrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: StaffUser,
) -> AppResult<Json<ApiResponse<TriageOrderList>>> {
    let resp = order_service::list_triage_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/staff/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Updated order", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status, payment method or restaurant"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn update_order(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/staff/availability",
    responses(
        (status = 200, description = "Product by restaurant availability grid", body = ApiResponse<AvailabilityGrid>),
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn availability_grid(
    State(state): State<AppState>,
    _user: StaffUser,
) -> AppResult<Json<ApiResponse<AvailabilityGrid>>> {
    let resp = menu_service::availability_grid(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/staff/availability",
    request_body = SetAvailabilityRequest,
    responses(
        (status = 200, description = "Upserted menu item", body = ApiResponse<RestaurantMenuItem>),
        (status = 404, description = "Unknown restaurant or product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    _user: StaffUser,
    Json(payload): Json<SetAvailabilityRequest>,
) -> AppResult<Json<ApiResponse<RestaurantMenuItem>>> {
    let resp = menu_service::set_availability(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/staff/restaurants", security(("bearer_auth" = [])), tag = "Staff")]
pub async fn list_restaurants(
    State(state): State<AppState>,
    _user: StaffUser,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    let resp = restaurant_service::list_restaurants(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/staff/restaurants",
    request_body = CreateRestaurantRequest,
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    _user: StaffUser,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let resp = restaurant_service::create_restaurant(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/staff/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = UpdateRestaurantRequest,
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn update_restaurant(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let resp = restaurant_service::update_restaurant(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/staff/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = restaurant_service::delete_restaurant(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/staff/products", security(("bearer_auth" = [])), tag = "Staff")]
pub async fn list_products(
    State(state): State<AppState>,
    _user: StaffUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/staff/products",
    request_body = CreateProductRequest,
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn create_product(
    State(state): State<AppState>,
    _user: StaffUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::create_product(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/staff/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::update_product(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/staff/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/staff/categories", security(("bearer_auth" = [])), tag = "Staff")]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: StaffUser,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/staff/categories",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _user: StaffUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<ProductCategory>>> {
    let resp = catalog_service::create_category(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/staff/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _user: StaffUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_category(&state, id).await?;
    Ok(Json(resp))
}
