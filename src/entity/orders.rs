use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub address: String,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub comment: String,
    pub serving_restaurant_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub called_at: Option<DateTimeWithTimeZone>,
    pub delivered_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::ServingRestaurantId",
        to = "super::restaurants::Column::Id"
    )]
    Restaurants,
    #[sea_orm(has_many = "super::order_elements::Entity")]
    OrderElements,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::order_elements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderElements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
