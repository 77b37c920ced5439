use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ProductCategory, Restaurant};

/// A restaurant able to serve an order, ranked by distance from the
/// delivery address. `distance_km` is absent when either address could
/// not be geocoded.
#[derive(Debug, Serialize, ToSchema)]
pub struct CandidateRestaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub distance_km: Option<f64>,
}

/// One row of the staff order triage list.
#[derive(Debug, Serialize, ToSchema)]
pub struct TriageOrder {
    pub id: Uuid,
    pub status: String,
    pub status_label: String,
    pub payment_method: Option<String>,
    pub payment_method_label: Option<String>,
    /// Sum of quantity times captured price over all line items.
    pub cost: i64,
    pub client: String,
    pub phonenumber: String,
    pub address: String,
    pub comment: String,
    pub serving_restaurants: Vec<CandidateRestaurant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TriageOrderList {
    pub items: Vec<TriageOrder>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub comment: Option<String>,
    pub serving_restaurant_id: Option<Uuid>,
    pub called_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantRef {
    pub id: Uuid,
    pub name: String,
}

/// Availability flags for one product, aligned with the grid's
/// restaurant order. A missing menu item reads as unavailable.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductAvailabilityRow {
    pub id: Uuid,
    pub name: String,
    pub availability: Vec<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityGrid {
    pub restaurants: Vec<RestaurantRef>,
    pub products: Vec<ProductAvailabilityRow>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAvailabilityRequest {
    pub restaurant_id: Uuid,
    pub product_id: Uuid,
    pub availability: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub items: Vec<Restaurant>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<ProductCategory>,
}
