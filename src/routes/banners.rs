use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct Banner {
    pub title: String,
    pub src: String,
    pub text: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(banners_list))
}

#[utoipa::path(
    get,
    path = "/api/banners",
    responses(
        (status = 200, description = "Storefront banners", body = ApiResponse<Vec<Banner>>)
    ),
    tag = "Storefront"
)]
pub async fn banners_list() -> Json<ApiResponse<Vec<Banner>>> {
    // Hard-coded storefront content; nothing in the product data drives it.
    let banners = vec![
        Banner {
            title: "Burger".into(),
            src: "/media/banners/burger.jpg".into(),
            text: "Tasty Burger at your door step".into(),
        },
        Banner {
            title: "Spices".into(),
            src: "/media/banners/food.jpg".into(),
            text: "All Cuisines".into(),
        },
        Banner {
            title: "New York".into(),
            src: "/media/banners/tasty.jpg".into(),
            text: "Food is incomplete without a tasty dessert".into(),
        },
    ];

    Json(ApiResponse::success("Banners", banners, Some(Meta::empty())))
}
