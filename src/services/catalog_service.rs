use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::products::{
        CategoryRef, CreateProductRequest, ProductList, StorefrontProduct, StorefrontProductList,
        UpdateProductRequest,
    },
    dto::staff::{CategoryList, CreateCategoryRequest},
    entity::{
        product_categories::{
            ActiveModel as CategoryActive, Entity as ProductCategories, Model as CategoryModel,
        },
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products,
            Model as ProductModel},
        restaurant_menu_items::{Column as MenuCol, Entity as RestaurantMenuItems},
    },
    error::{AppError, AppResult},
    models::{Product, ProductCategory},
    response::{ApiResponse, Meta},
    state::AppState,
};

// Column widths from the products and product_categories tables.
const MAX_NAME_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 200;

fn check_len(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    if value.chars().count() > max_len {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Storefront listing: products carried by at least one restaurant with
/// an available menu item, joined with their category.
pub async fn list_available_products(
    state: &AppState,
) -> AppResult<ApiResponse<StorefrontProductList>> {
    let available_ids: Vec<Uuid> = RestaurantMenuItems::find()
        .filter(MenuCol::Availability.eq(true))
        .select_only()
        .column(MenuCol::ProductId)
        .distinct()
        .into_tuple()
        .all(&state.orm)
        .await?;

    let rows = Products::find()
        .filter(ProdCol::Id.is_in(available_ids))
        .find_also_related(ProductCategories)
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?;

    let items: Vec<StorefrontProduct> = rows
        .into_iter()
        .map(|(product, category)| StorefrontProduct {
            id: product.id,
            name: product.name,
            price: product.price,
            featured: product.featured,
            description: product.description,
            category: category.map(|c| CategoryRef {
                id: c.id,
                name: c.name,
            }),
            image: product.image_url,
        })
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Products",
        StorefrontProductList { items },
        Some(meta),
    ))
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    check_len("name", &payload.name, MAX_NAME_LEN)?;
    check_len("description", &payload.description, MAX_DESCRIPTION_LEN)?;
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(state, category_id).await?;
    }

    let active = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        category_id: Set(payload.category_id),
        price: Set(payload.price),
        image_url: Set(payload.image_url),
        featured: Set(payload.featured),
        description: Set(payload.description),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
    }
    if let Some(Some(category_id)) = payload.category_id {
        ensure_category_exists(state, category_id).await?;
    }

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        check_len("name", &name, MAX_NAME_LEN)?;
        active.name = Set(name);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    if let Some(description) = payload.description {
        check_len("description", &description, MAX_DESCRIPTION_LEN)?;
        active.description = Set(description);
    }

    let product = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<ProductCategory> = ProductCategories::find()
        .order_by_asc(crate::entity::product_categories::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<ProductCategory>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }
    check_len("name", &payload.name, MAX_NAME_LEN)?;

    let active = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        created_at: NotSet,
    };
    let category = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductCategories::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn ensure_category_exists(state: &AppState, id: Uuid) -> AppResult<()> {
    if ProductCategories::find_by_id(id).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest("Unknown product category".into()));
    }
    Ok(())
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        category_id: model.category_id,
        price: model.price,
        image_url: model.image_url,
        featured: model.featured,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn category_from_entity(model: CategoryModel) -> ProductCategory {
    ProductCategory {
        id: model.id,
        name: model.name,
    }
}
