use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        super::country_customer::Relation::Customer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::country_customer::Relation::Country.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
