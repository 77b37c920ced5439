use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::staff::{AvailabilityGrid, ProductAvailabilityRow, RestaurantRef, SetAvailabilityRequest},
    entity::{
        products::{Column as ProdCol, Entity as Products},
        restaurant_menu_items::{
            ActiveModel as MenuActive, Column as MenuCol, Entity as RestaurantMenuItems,
            Model as MenuModel,
        },
        restaurants::{Column as RestCol, Entity as Restaurants},
    },
    error::{AppError, AppResult},
    models::RestaurantMenuItem,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Product-by-restaurant availability grid. Restaurants are ordered by
/// name and each product row carries flags in that same order; a pair
/// without a menu item reads as unavailable.
pub async fn availability_grid(state: &AppState) -> AppResult<ApiResponse<AvailabilityGrid>> {
    let restaurants = Restaurants::find()
        .order_by_asc(RestCol::Name)
        .all(&state.orm)
        .await?;
    let products = Products::find()
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?;
    let menu_items = RestaurantMenuItems::find().all(&state.orm).await?;

    let mut flags: HashMap<(Uuid, Uuid), bool> = HashMap::new();
    for item in menu_items {
        flags.insert((item.product_id, item.restaurant_id), item.availability);
    }

    let product_rows = products
        .into_iter()
        .map(|product| {
            let availability = restaurants
                .iter()
                .map(|restaurant| {
                    flags
                        .get(&(product.id, restaurant.id))
                        .copied()
                        .unwrap_or(false)
                })
                .collect();
            ProductAvailabilityRow {
                id: product.id,
                name: product.name,
                availability,
            }
        })
        .collect();

    let grid = AvailabilityGrid {
        restaurants: restaurants
            .into_iter()
            .map(|r| RestaurantRef {
                id: r.id,
                name: r.name,
            })
            .collect(),
        products: product_rows,
    };

    Ok(ApiResponse::success("Availability", grid, Some(Meta::empty())))
}

/// Upsert one (restaurant, product) availability flag.
pub async fn set_availability(
    state: &AppState,
    payload: SetAvailabilityRequest,
) -> AppResult<ApiResponse<RestaurantMenuItem>> {
    if Restaurants::find_by_id(payload.restaurant_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let existing = RestaurantMenuItems::find()
        .filter(MenuCol::RestaurantId.eq(payload.restaurant_id))
        .filter(MenuCol::ProductId.eq(payload.product_id))
        .one(&state.orm)
        .await?;

    let item = match existing {
        Some(item) => {
            let mut active: MenuActive = item.into();
            active.availability = Set(payload.availability);
            active.update(&state.orm).await?
        }
        None => {
            let active = MenuActive {
                id: Set(Uuid::new_v4()),
                restaurant_id: Set(payload.restaurant_id),
                product_id: Set(payload.product_id),
                availability: Set(payload.availability),
            };
            active.insert(&state.orm).await?
        }
    };

    Ok(ApiResponse::success(
        "Availability updated",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

fn menu_item_from_entity(model: MenuModel) -> RestaurantMenuItem {
    RestaurantMenuItem {
        id: model.id,
        restaurant_id: model.restaurant_id,
        product_id: model.product_id,
        availability: model.availability,
    }
}
