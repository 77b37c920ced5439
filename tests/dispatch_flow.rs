use foodcart_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{OrderedProduct, RegisterOrderRequest},
    dto::staff::{SetAvailabilityRequest, UpdateOrderRequest},
    entity::{
        locations::ActiveModel as LocationActive,
        products::ActiveModel as ProductActive,
        restaurant_menu_items::ActiveModel as MenuActive,
        restaurants::ActiveModel as RestaurantActive,
    },
    error::AppError,
    geo::Geocoder,
    models::order_status,
    services::{menu_service, order_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

const DELIVERY_ADDRESS: &str = "5 Delivery lane";
const DOWNTOWN_ADDRESS: &str = "1 Downtown square";
const RIVERSIDE_ADDRESS: &str = "9 Riverside walk";

// Staff triage flow: availability intersection, distance ranking from
// the geocode cache, capability-checked assignment.
#[tokio::test]
async fn triage_matching_and_assignment_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let downtown = seed_restaurant(&state, "Downtown Kitchen", DOWNTOWN_ADDRESS).await?;
    let riverside = seed_restaurant(&state, "Riverside Grill", RIVERSIDE_ADDRESS).await?;
    let empty_cafe = seed_restaurant(&state, "Empty Cafe", "2 Nowhere alley").await?;

    let burger = seed_product(&state, "Burger", 35000).await?;
    let dessert = seed_product(&state, "Dessert", 22000).await?;

    seed_menu_item(&state, downtown, burger, true).await?;
    seed_menu_item(&state, downtown, dessert, true).await?;
    seed_menu_item(&state, riverside, burger, true).await?;
    seed_menu_item(&state, riverside, dessert, false).await?;

    // Pre-warm the geocode cache. The geocoder itself is unroutable, so
    // every distance below can only come from these rows.
    seed_location(&state, DELIVERY_ADDRESS, 55.7500, 37.6200).await?;
    seed_location(&state, DOWNTOWN_ADDRESS, 55.7510, 37.6210).await?;
    seed_location(&state, RIVERSIDE_ADDRESS, 55.8000, 37.7000).await?;

    let resp = order_service::register_order(
        &state,
        request(DELIVERY_ADDRESS, vec![(burger, 2), (dessert, 1)]),
    )
    .await?;
    let order_id = resp.data.unwrap().order.id;

    // Riverside has no dessert, so only Downtown can serve the order.
    let triage = order_service::list_triage_orders(&state).await?;
    let items = triage.data.unwrap().items;
    assert_eq!(items.len(), 1);
    let entry = &items[0];
    assert_eq!(entry.cost, 2 * 35000 + 22000);
    assert_eq!(entry.serving_restaurants.len(), 1);
    assert_eq!(entry.serving_restaurants[0].id, downtown);
    assert!(
        entry.serving_restaurants[0].distance_km.is_some(),
        "distance must be served from the cache"
    );

    // Making dessert available at Riverside adds it as a candidate,
    // ranked behind the nearer Downtown.
    menu_service::set_availability(
        &state,
        SetAvailabilityRequest {
            restaurant_id: riverside,
            product_id: dessert,
            availability: true,
        },
    )
    .await?;

    let triage = order_service::list_triage_orders(&state).await?;
    let candidates = triage.data.unwrap().items.remove(0).serving_restaurants;
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id, downtown);
    assert_eq!(candidates[1].id, riverside);
    let near = candidates[0].distance_km.unwrap();
    let far = candidates[1].distance_km.unwrap();
    assert!(near < far, "expected {near} < {far}");

    // A restaurant that cannot supply every line item is rejected.
    let rejected = order_service::update_order(
        &state,
        order_id,
        assign_restaurant(empty_cafe),
    )
    .await;
    match rejected {
        Err(AppError::Validation(errors)) => {
            assert!(errors.0.contains_key("serving_restaurant_id"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Assigning a capable restaurant auto-advances an unprocessed order.
    let updated = order_service::update_order(&state, order_id, assign_restaurant(downtown))
        .await?
        .data
        .unwrap();
    assert_eq!(updated.status, order_status::ASSEMBLING);
    assert_eq!(updated.serving_restaurant_id, Some(downtown));

    // Once assigned, the triage list shows only the assigned restaurant.
    let triage = order_service::list_triage_orders(&state).await?;
    let candidates = triage.data.unwrap().items.remove(0).serving_restaurants;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, downtown);

    // An order whose address is not cached gets candidates without
    // distances, in deterministic name order.
    order_service::register_order(&state, request("77 Unknown street", vec![(burger, 1)]))
        .await?;
    let triage = order_service::list_triage_orders(&state).await?;
    let items = triage.data.unwrap().items;
    let unknown = items
        .iter()
        .find(|o| o.address == "77 Unknown street")
        .expect("second order in triage");
    assert_eq!(unknown.serving_restaurants.len(), 2);
    assert!(unknown.serving_restaurants.iter().all(|c| c.distance_km.is_none()));
    assert_eq!(unknown.serving_restaurants[0].name, "Downtown Kitchen");
    assert_eq!(unknown.serving_restaurants[1].name, "Riverside Grill");

    // Unknown status values are rejected; completed orders leave triage.
    let bad_status = order_service::update_order(
        &state,
        order_id,
        UpdateOrderRequest {
            status: Some("bogus".into()),
            payment_method: None,
            comment: None,
            serving_restaurant_id: None,
            called_at: None,
            delivered_at: None,
        },
    )
    .await;
    assert!(matches!(bad_status, Err(AppError::Validation(_))));

    order_service::update_order(
        &state,
        order_id,
        UpdateOrderRequest {
            status: Some(order_status::COMPLETED.into()),
            payment_method: Some("cash".into()),
            comment: None,
            serving_restaurant_id: None,
            called_at: None,
            delivered_at: None,
        },
    )
    .await?;
    let triage = order_service::list_triage_orders(&state).await?;
    let items = triage.data.unwrap().items;
    assert!(items.iter().all(|o| o.id != order_id));

    Ok(())
}

fn request(address: &str, products: Vec<(Uuid, i32)>) -> RegisterOrderRequest {
    RegisterOrderRequest {
        address: address.into(),
        firstname: "Anna".into(),
        lastname: "Smirnova".into(),
        phonenumber: "+79990001122".into(),
        products: products
            .into_iter()
            .map(|(product, quantity)| OrderedProduct { product, quantity })
            .collect(),
    }
}

fn assign_restaurant(restaurant_id: Uuid) -> UpdateOrderRequest {
    UpdateOrderRequest {
        status: None,
        payment_method: None,
        comment: None,
        serving_restaurant_id: Some(restaurant_id),
        called_at: None,
        delivered_at: None,
    }
}

async fn seed_restaurant(state: &AppState, name: &str, address: &str) -> anyhow::Result<Uuid> {
    let restaurant = RestaurantActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        address: Set(address.into()),
        contact_phone: Set(String::new()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(restaurant.id)
}

async fn seed_product(state: &AppState, name: &str, price: i64) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        category_id: Set(None),
        price: Set(price),
        image_url: Set(String::new()),
        featured: Set(false),
        description: Set(String::new()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product.id)
}

async fn seed_menu_item(
    state: &AppState,
    restaurant_id: Uuid,
    product_id: Uuid,
    availability: bool,
) -> anyhow::Result<()> {
    MenuActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        product_id: Set(product_id),
        availability: Set(availability),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

async fn seed_location(
    state: &AppState,
    address: &str,
    latitude: f64,
    longitude: f64,
) -> anyhow::Result<()> {
    LocationActive {
        id: Set(Uuid::new_v4()),
        address: Set(address.into()),
        latitude: Set(Some(latitude)),
        longitude: Set(Some(longitude)),
        received_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(database_url).await?;

    // Clean tables between runs.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_elements, orders, restaurant_menu_items, products, product_categories, restaurants, locations, staff_users RESTART IDENTITY CASCADE",
    ))
    .await?;

    // Unroutable geocoder; a cache miss must yield "no distance", never
    // an outbound call that succeeds.
    let geocoder = Geocoder::new("test-key", "http://127.0.0.1:9/geocode")?;

    Ok(AppState {
        pool,
        orm,
        geocoder,
    })
}
