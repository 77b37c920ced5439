use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use foodcart_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let staff_id = ensure_staff_user(&pool, "manager", "manager123").await?;

    let burgers = ensure_category(&pool, "Burgers").await?;
    let desserts = ensure_category(&pool, "Desserts").await?;

    let downtown = ensure_restaurant(
        &pool,
        "Downtown Kitchen",
        "1 Tverskaya street, Moscow",
        "+7 495 000-00-01",
    )
    .await?;
    let riverside = ensure_restaurant(
        &pool,
        "Riverside Grill",
        "10 Arbat street, Moscow",
        "+7 495 000-00-02",
    )
    .await?;

    let classic = ensure_product(
        &pool,
        "Classic Burger",
        Some(burgers),
        35000,
        "/media/products/classic-burger.jpg",
        true,
        "Beef patty, cheddar, house sauce",
    )
    .await?;
    let cheesecake = ensure_product(
        &pool,
        "Cheesecake",
        Some(desserts),
        22000,
        "/media/products/cheesecake.jpg",
        false,
        "New York style",
    )
    .await?;

    ensure_menu_item(&pool, downtown, classic, true).await?;
    ensure_menu_item(&pool, downtown, cheesecake, true).await?;
    ensure_menu_item(&pool, riverside, classic, true).await?;
    ensure_menu_item(&pool, riverside, cheesecake, false).await?;

    // Pre-warm the geocode cache for the seeded restaurant addresses.
    ensure_location(&pool, "1 Tverskaya street, Moscow", 55.7577, 37.6120).await?;
    ensure_location(&pool, "10 Arbat street, Moscow", 55.7510, 37.5950).await?;

    println!("Seed completed. Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_staff_user(
    pool: &sqlx::PgPool,
    username: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO staff_users (id, username, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    let staff_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) =
                sqlx::query_as("SELECT id FROM staff_users WHERE username = $1")
                    .bind(username)
                    .fetch_one(pool)
                    .await?;
            existing.0
        }
    };

    println!("Ensured staff user {username}");
    Ok(staff_id)
}

async fn ensure_category(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM product_categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO product_categories (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(id)
}

async fn ensure_restaurant(
    pool: &sqlx::PgPool,
    name: &str,
    address: &str,
    contact_phone: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM restaurants WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO restaurants (id, name, address, contact_phone) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(name)
    .bind(address)
    .bind(contact_phone)
    .execute(pool)
    .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn ensure_product(
    pool: &sqlx::PgPool,
    name: &str,
    category_id: Option<Uuid>,
    price: i64,
    image_url: &str,
    featured: bool,
    description: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO products (id, name, category_id, price, image_url, featured, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(category_id)
    .bind(price)
    .bind(image_url)
    .bind(featured)
    .bind(description)
    .execute(pool)
    .await?;
    Ok(id)
}

async fn ensure_location(
    pool: &sqlx::PgPool,
    address: &str,
    latitude: f64,
    longitude: f64,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO locations (id, address, latitude, longitude)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (address) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(address)
    .bind(latitude)
    .bind(longitude)
    .execute(pool)
    .await?;
    Ok(())
}

async fn ensure_menu_item(
    pool: &sqlx::PgPool,
    restaurant_id: Uuid,
    product_id: Uuid,
    availability: bool,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO restaurant_menu_items (id, restaurant_id, product_id, availability)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (restaurant_id, product_id) DO UPDATE SET availability = EXCLUDED.availability
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .bind(product_id)
    .bind(availability)
    .execute(pool)
    .await?;
    Ok(())
}
