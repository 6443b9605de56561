use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "overtime_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,

    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::overtimes::Entity")]
    Overtimes,
}

impl Related<super::overtimes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Overtimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
