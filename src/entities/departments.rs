use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,

    pub name: String,

    pub general_department_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::general_departments::Entity",
        from = "Column::GeneralDepartmentId",
        to = "super::general_departments::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GeneralDepartment,

    #[sea_orm(has_many = "super::branches::Entity")]
    Branches,
}

impl Related<super::general_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralDepartment.def()
    }
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
