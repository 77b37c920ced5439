use foodcart_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{OrderedProduct, RegisterOrderRequest},
    entity::{
        order_elements::{Column as ElementCol, Entity as OrderElements},
        orders::Entity as Orders,
        product_categories::ActiveModel as CategoryActive,
        products::ActiveModel as ProductActive,
    },
    error::AppError,
    geo::Geocoder,
    models::order_status,
    services::order_service,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement,
};
use uuid::Uuid;

// Storefront registration flow: validation, persistence, price capture.
#[tokio::test]
async fn order_registration_flow() -> anyhow::Result<()> {
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

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set("Burgers".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let burger = seed_product(&state, "Test Burger", Some(category.id), 35000).await?;
    let fries = seed_product(&state, "Test Fries", None, 12000).await?;

    // Empty product list is rejected with a field error and no order row.
    let rejected = order_service::register_order(
        &state,
        request("12 Lenina street", vec![]),
    )
    .await;
    match rejected {
        Err(AppError::Validation(errors)) => assert!(errors.0.contains_key("products")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(Orders::find().count(&state.orm).await?, 0);

    // Unknown product is a 404, and nothing is persisted.
    let missing = order_service::register_order(
        &state,
        request(
            "12 Lenina street",
            vec![OrderedProduct {
                product: Uuid::new_v4(),
                quantity: 1,
            }],
        ),
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    assert_eq!(Orders::find().count(&state.orm).await?, 0);

    // Valid registration: one order, one element per product, prices captured.
    let resp = order_service::register_order(
        &state,
        request(
            "12 Lenina street",
            vec![
                OrderedProduct {
                    product: burger,
                    quantity: 2,
                },
                OrderedProduct {
                    product: fries,
                    quantity: 1,
                },
            ],
        ),
    )
    .await?;
    let registered = resp.data.expect("order data");
    assert_eq!(registered.order.status, order_status::UNPROCESSED);
    assert_eq!(registered.elements.len(), 2);

    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    let elements = OrderElements::find()
        .filter(ElementCol::OrderId.eq(registered.order.id))
        .all(&state.orm)
        .await?;
    assert_eq!(elements.len(), 2);

    let burger_element = elements.iter().find(|e| e.product_id == burger).unwrap();
    assert_eq!(burger_element.price, 35000);
    assert_eq!(burger_element.quantity, 2);
    let fries_element = elements.iter().find(|e| e.product_id == fries).unwrap();
    assert_eq!(fries_element.price, 12000);

    // A later price change must not touch the captured element price.
    let mut active: foodcart_api::entity::products::ActiveModel =
        foodcart_api::entity::Products::find_by_id(burger)
            .one(&state.orm)
            .await?
            .unwrap()
            .into();
    active.price = Set(40000);
    active.update(&state.orm).await?;

    let unchanged = OrderElements::find()
        .filter(ElementCol::OrderId.eq(registered.order.id))
        .filter(ElementCol::ProductId.eq(burger))
        .one(&state.orm)
        .await?
        .unwrap();
    assert_eq!(unchanged.price, 35000);

    Ok(())
}

fn request(address: &str, products: Vec<OrderedProduct>) -> RegisterOrderRequest {
    RegisterOrderRequest {
        address: address.into(),
        firstname: "Ivan".into(),
        lastname: "Petrov".into(),
        phonenumber: "+79991234567".into(),
        products,
    }
}

async fn seed_product(
    state: &AppState,
    name: &str,
    category_id: Option<Uuid>,
    price: i64,
) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        category_id: Set(category_id),
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

    // Unroutable geocoder; these tests must never leave the machine.
    let geocoder = Geocoder::new("test-key", "http://127.0.0.1:9/geocode")?;

    Ok(AppState {
        pool,
        orm,
        geocoder,
    })
}
