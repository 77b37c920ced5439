use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub price: i64,
    pub image_url: String,
    pub featured: bool,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_categories::Entity",
        from = "Column::CategoryId",
        to = "super::product_categories::Column::Id"
    )]
    ProductCategories,
    #[sea_orm(has_many = "super::restaurant_menu_items::Entity")]
    RestaurantMenuItems,
    #[sea_orm(has_many = "super::order_elements::Entity")]
    OrderElements,
}

impl Related<super::product_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

impl Related<super::restaurant_menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantMenuItems.def()
    }
}

impl Related<super::order_elements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderElements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
