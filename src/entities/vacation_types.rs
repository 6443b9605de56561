use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vacation_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,

    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vacations::Entity")]
    Vacations,
}

impl Related<super::vacations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vacations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
