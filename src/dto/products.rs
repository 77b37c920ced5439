use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Storefront listing entry: product joined with its category.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorefrontProduct {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub featured: bool,
    pub description: String,
    pub category: Option<CategoryRef>,
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StorefrontProductList {
    pub items: Vec<StorefrontProduct>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub category_id: Option<Uuid>,
    pub price: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category_id: Option<Option<Uuid>>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
