use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderWithElements, RegisterOrderRequest},
    dto::staff::{TriageOrder, TriageOrderList, UpdateOrderRequest},
    entity::{
        order_elements::{
            ActiveModel as ElementActive, Column as ElementCol, Entity as OrderElements,
            Model as ElementModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders,
            Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
        restaurants::Entity as Restaurants,
    },
    error::{AppError, AppResult, FieldErrors},
    models::{Order, OrderElement, order_status, payment_method},
    response::{ApiResponse, Meta},
    services::dispatch_service,
    state::AppState,
};

/// Storefront order registration. The order row and all of its line
/// items commit in one transaction; each line item captures the
/// product's price at this moment.
pub async fn register_order(
    state: &AppState,
    payload: RegisterOrderRequest,
) -> AppResult<ApiResponse<OrderWithElements>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let product_ids: Vec<Uuid> = payload.products.iter().map(|p| p.product).collect();
    let products: HashMap<Uuid, i64> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.price))
        .collect();

    for id in &product_ids {
        if !products.contains_key(id) {
            return Err(AppError::NotFound);
        }
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        address: Set(payload.address),
        firstname: Set(payload.firstname),
        lastname: Set(payload.lastname),
        phonenumber: Set(payload.phonenumber),
        status: Set(order_status::UNPROCESSED.to_string()),
        payment_method: Set(None),
        comment: Set(String::new()),
        serving_restaurant_id: Set(None),
        created_at: NotSet,
        called_at: Set(None),
        delivered_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let mut elements: Vec<OrderElement> = Vec::with_capacity(payload.products.len());
    for item in &payload.products {
        let price = products[&item.product];
        let element = ElementActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(item.product),
            quantity: Set(item.quantity),
            price: Set(price),
        }
        .insert(&txn)
        .await?;
        elements.push(element_from_entity(element));
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, items = elements.len(), "order registered");

    Ok(ApiResponse::success(
        "Order registered",
        OrderWithElements {
            order: order_from_entity(order),
            elements,
        },
        Some(Meta::empty()),
    ))
}

/// Staff triage list: every order not yet completed, sorted by lifecycle
/// position then age, with its cost and distance-ranked candidate
/// restaurants.
pub async fn list_triage_orders(state: &AppState) -> AppResult<ApiResponse<TriageOrderList>> {
    let mut orders = Orders::find()
        .filter(OrderCol::Status.ne(order_status::COMPLETED))
        .order_by_asc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;
    orders.sort_by_key(|o| order_status::rank(&o.status));

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut elements_by_order: HashMap<Uuid, Vec<ElementModel>> = HashMap::new();
    for element in OrderElements::find()
        .filter(ElementCol::OrderId.is_in(order_ids))
        .all(&state.orm)
        .await?
    {
        elements_by_order.entry(element.order_id).or_default().push(element);
    }

    let menu_index = dispatch_service::load_menu_index(&state.orm).await?;
    let restaurants: HashMap<Uuid, _> = Restaurants::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let elements = elements_by_order.remove(&order.id).unwrap_or_default();

        let candidates = if let Some(assigned_id) = order.serving_restaurant_id {
            match restaurants.get(&assigned_id) {
                Some(assigned) => {
                    dispatch_service::rank_candidates(state, &order.address, vec![assigned]).await?
                }
                None => Vec::new(),
            }
        } else if order.status != order_status::UNPROCESSED {
            // Someone already took the order without recording a
            // restaurant; suggesting candidates would be misleading.
            Vec::new()
        } else {
            let product_ids: Vec<Uuid> = elements.iter().map(|e| e.product_id).collect();
            let capable = menu_index.capable_restaurants(&product_ids);
            let capable: Vec<_> = capable
                .into_iter()
                .filter_map(|id| restaurants.get(&id))
                .collect();
            dispatch_service::rank_candidates(state, &order.address, capable).await?
        };

        items.push(TriageOrder {
            id: order.id,
            status_label: order_status::label(&order.status).to_string(),
            status: order.status,
            payment_method_label: order
                .payment_method
                .as_deref()
                .map(|m| payment_method::label(m).to_string()),
            payment_method: order.payment_method,
            cost: order_cost(&elements),
            client: format!("{} {}", order.firstname, order.lastname),
            phonenumber: order.phonenumber,
            address: order.address,
            comment: order.comment,
            serving_restaurants: candidates,
        });
    }

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Orders",
        TriageOrderList { items },
        Some(meta),
    ))
}

/// Staff order update: status, payment method, comment, call/delivery
/// timestamps, serving restaurant. Assigning a restaurant checks it can
/// supply every line item; assigning one to an unprocessed order moves
/// the order to assembling unless the payload sets a status explicitly.
pub async fn update_order(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let mut errors = FieldErrors::new();
    if let Some(status) = payload.status.as_deref() {
        if !order_status::is_valid(status) {
            errors.push("status", "Unknown order status.");
        }
    }
    if let Some(method) = payload.payment_method.as_deref() {
        if !payment_method::is_valid(method) {
            errors.push("payment_method", "Unknown payment method.");
        }
    }
    errors.into_result()?;

    if let Some(restaurant_id) = payload.serving_restaurant_id {
        if Restaurants::find_by_id(restaurant_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound);
        }

        let product_ids: Vec<Uuid> = OrderElements::find()
            .filter(ElementCol::OrderId.eq(id))
            .select_only()
            .column(ElementCol::ProductId)
            .into_tuple()
            .all(&state.orm)
            .await?;
        let menu_index = dispatch_service::load_menu_index(&state.orm).await?;
        if !menu_index.capable_restaurants(&product_ids).contains(&restaurant_id) {
            let mut errors = FieldErrors::new();
            errors.push(
                "serving_restaurant_id",
                "Restaurant cannot supply every product in this order.",
            );
            return Err(AppError::Validation(errors));
        }
    }

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let was_unprocessed = order.status == order_status::UNPROCESSED;

    let mut active: OrderActive = order.into();
    if let Some(status) = payload.status.clone() {
        active.status = Set(status);
    } else if was_unprocessed && payload.serving_restaurant_id.is_some() {
        active.status = Set(order_status::ASSEMBLING.to_string());
    }
    if let Some(method) = payload.payment_method {
        active.payment_method = Set(Some(method));
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(comment);
    }
    if let Some(restaurant_id) = payload.serving_restaurant_id {
        active.serving_restaurant_id = Set(Some(restaurant_id));
    }
    if let Some(called_at) = payload.called_at {
        active.called_at = Set(Some(called_at.into()));
    }
    if let Some(delivered_at) = payload.delivered_at {
        active.delivered_at = Set(Some(delivered_at.into()));
    }

    let order = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub fn order_cost(elements: &[ElementModel]) -> i64 {
    elements
        .iter()
        .map(|e| e.price * i64::from(e.quantity))
        .sum()
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        address: model.address,
        firstname: model.firstname,
        lastname: model.lastname,
        phonenumber: model.phonenumber,
        status: model.status,
        payment_method: model.payment_method,
        comment: model.comment,
        serving_restaurant_id: model.serving_restaurant_id,
        created_at: model.created_at.with_timezone(&Utc),
        called_at: model.called_at.map(|dt| dt.with_timezone(&Utc)),
        delivered_at: model.delivered_at.map(|dt| dt.with_timezone(&Utc)),
    }
}

fn element_from_entity(model: ElementModel) -> OrderElement {
    OrderElement {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price: model.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(quantity: i32, price: i64) -> ElementModel {
        ElementModel {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity,
            price,
        }
    }

    #[test]
    fn cost_sums_quantity_times_price() {
        let elements = vec![element(2, 1500), element(1, 700)];
        assert_eq!(order_cost(&elements), 3700);
    }

    #[test]
    fn cost_of_empty_order_is_zero() {
        assert_eq!(order_cost(&[]), 0);
    }
}
