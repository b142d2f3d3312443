use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

// Many-to-many with countries through the country_customer join table.
impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        super::country_customer::Relation::Country.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::country_customer::Relation::Customer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
