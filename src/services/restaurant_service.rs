use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::staff::{CreateRestaurantRequest, RestaurantList, UpdateRestaurantRequest},
    entity::restaurants::{
        ActiveModel as RestaurantActive, Column as RestCol, Entity as Restaurants,
        Model as RestaurantModel,
    },
    error::{AppError, AppResult},
    models::Restaurant,
    response::{ApiResponse, Meta},
    state::AppState,
};

// Column widths from the restaurants table.
const MAX_NAME_LEN: usize = 50;
const MAX_ADDRESS_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 50;

fn check_len(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    if value.chars().count() > max_len {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

pub async fn list_restaurants(state: &AppState) -> AppResult<ApiResponse<RestaurantList>> {
    let items: Vec<Restaurant> = Restaurants::find()
        .order_by_asc(RestCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Restaurants",
        RestaurantList { items },
        Some(meta),
    ))
}

pub async fn create_restaurant(
    state: &AppState,
    payload: CreateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }
    check_len("name", &payload.name, MAX_NAME_LEN)?;
    check_len("address", &payload.address, MAX_ADDRESS_LEN)?;
    check_len("contact_phone", &payload.contact_phone, MAX_PHONE_LEN)?;

    let active = RestaurantActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        address: Set(payload.address),
        contact_phone: Set(payload.contact_phone),
        created_at: NotSet,
    };
    let restaurant = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Restaurant created",
        restaurant_from_entity(restaurant),
        Some(Meta::empty()),
    ))
}

pub async fn update_restaurant(
    state: &AppState,
    id: Uuid,
    payload: UpdateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let existing = Restaurants::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let mut active: RestaurantActive = existing.into();
    if let Some(name) = payload.name {
        check_len("name", &name, MAX_NAME_LEN)?;
        active.name = Set(name);
    }
    if let Some(address) = payload.address {
        check_len("address", &address, MAX_ADDRESS_LEN)?;
        active.address = Set(address);
    }
    if let Some(contact_phone) = payload.contact_phone {
        check_len("contact_phone", &contact_phone, MAX_PHONE_LEN)?;
        active.contact_phone = Set(contact_phone);
    }

    let restaurant = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        restaurant_from_entity(restaurant),
        Some(Meta::empty()),
    ))
}

pub async fn delete_restaurant(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Restaurants::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub(crate) fn restaurant_from_entity(model: RestaurantModel) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        address: model.address,
        contact_phone: model.contact_phone,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlong_fields_are_client_errors() {
        assert!(check_len("name", &"n".repeat(MAX_NAME_LEN), MAX_NAME_LEN).is_ok());
        let err = check_len("name", &"n".repeat(MAX_NAME_LEN + 1), MAX_NAME_LEN).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
