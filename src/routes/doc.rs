use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{OrderWithElements, OrderedProduct, RegisterOrderRequest},
        products::{
            CategoryRef, CreateProductRequest, ProductList, StorefrontProduct,
            StorefrontProductList, UpdateProductRequest,
        },
        staff::{
            AvailabilityGrid, CandidateRestaurant, CategoryList, CreateCategoryRequest,
            CreateRestaurantRequest, ProductAvailabilityRow, RestaurantList, RestaurantRef,
            SetAvailabilityRequest, TriageOrder, TriageOrderList, UpdateOrderRequest,
            UpdateRestaurantRequest,
        },
    },
    models::{Order, OrderElement, Product, ProductCategory, Restaurant, RestaurantMenuItem},
    response::{ApiResponse, Meta},
    routes::{auth, banners, health, orders, products, staff},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        banners::banners_list,
        products::list_available_products,
        orders::register_order,
        auth::login,
        staff::list_orders,
        staff::update_order,
        staff::availability_grid,
        staff::set_availability,
        staff::list_restaurants,
        staff::create_restaurant,
        staff::update_restaurant,
        staff::delete_restaurant,
        staff::list_products,
        staff::create_product,
        staff::update_product,
        staff::delete_product,
        staff::list_categories,
        staff::create_category,
        staff::delete_category,
    ),
    components(
        schemas(
            Restaurant,
            ProductCategory,
            Product,
            RestaurantMenuItem,
            Order,
            OrderElement,
            banners::Banner,
            LoginRequest,
            LoginResponse,
            RegisterOrderRequest,
            OrderedProduct,
            OrderWithElements,
            StorefrontProduct,
            StorefrontProductList,
            CategoryRef,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            TriageOrder,
            TriageOrderList,
            CandidateRestaurant,
            UpdateOrderRequest,
            AvailabilityGrid,
            ProductAvailabilityRow,
            RestaurantRef,
            SetAvailabilityRequest,
            CreateRestaurantRequest,
            UpdateRestaurantRequest,
            RestaurantList,
            CreateCategoryRequest,
            CategoryList,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderWithElements>,
            ApiResponse<StorefrontProductList>,
            ApiResponse<TriageOrderList>,
            ApiResponse<AvailabilityGrid>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Storefront", description = "Public storefront endpoints"),
        (name = "Auth", description = "Staff authentication"),
        (name = "Staff", description = "Restaurant management console endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
