use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod banners;
pub mod doc;
pub mod health;
pub mod orders;
pub mod products;
pub mod staff;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/banners", banners::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/auth", auth::router())
        .nest("/staff", staff::router())
}
