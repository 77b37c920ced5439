pub mod locations;
pub mod order_elements;
pub mod orders;
pub mod product_categories;
pub mod products;
pub mod restaurant_menu_items;
pub mod restaurants;

pub use locations::Entity as Locations;
pub use order_elements::Entity as OrderElements;
pub use orders::Entity as Orders;
pub use product_categories::Entity as ProductCategories;
pub use products::Entity as Products;
pub use restaurant_menu_items::Entity as RestaurantMenuItems;
pub use restaurants::Entity as Restaurants;
