use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Order lifecycle stages, in the order the triage list presents them.
/// Staff may set any stage; there is no forward-only restriction.
pub mod order_status {
    pub const UNPROCESSED: &str = "unprocessed";
    pub const ASSEMBLING: &str = "assembling";
    pub const DELIVERING: &str = "delivering";
    pub const COMPLETED: &str = "completed";

    pub const ALL: [&str; 4] = [UNPROCESSED, ASSEMBLING, DELIVERING, COMPLETED];

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }

    /// Position in the lifecycle, used to sort the triage list.
    pub fn rank(status: &str) -> usize {
        ALL.iter().position(|s| *s == status).unwrap_or(ALL.len())
    }

    pub fn label(status: &str) -> &'static str {
        match status {
            UNPROCESSED => "Unprocessed",
            ASSEMBLING => "Assembling",
            DELIVERING => "Delivering",
            COMPLETED => "Completed",
            _ => "Unknown",
        }
    }
}

pub mod payment_method {
    pub const ELECTRONIC: &str = "electronic";
    pub const CASH: &str = "cash";

    pub const ALL: [&str; 2] = [ELECTRONIC, CASH];

    pub fn is_valid(method: &str) -> bool {
        ALL.contains(&method)
    }

    pub fn label(method: &str) -> &'static str {
        match method {
            ELECTRONIC => "Electronic",
            CASH => "Cash",
            _ => "Unknown",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCategory {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    /// Price in minor currency units.
    pub price: i64,
    pub image_url: String,
    pub featured: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantMenuItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub product_id: Uuid,
    pub availability: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub address: String,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub comment: String,
    pub serving_restaurant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub called_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderElement {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Product price captured at registration time.
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// One row per geocoded address; null coordinates mean the geocoder
/// could not resolve the address.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: Uuid,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub received_at: DateTime<Utc>,
}
