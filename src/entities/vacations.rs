use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vacations")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,

    pub employee_id: i32,

    pub start_date: Date,

    pub end_date: Date,

    pub vacation_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Employee,

    #[sea_orm(
        belongs_to = "super::vacation_types::Entity",
        from = "Column::VacationTypeId",
        to = "super::vacation_types::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VacationType,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::vacation_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VacationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
