use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_departments_general_department", "departments", "general_department_id"),
    ("idx_branches_department", "branches", "department_id"),
    ("idx_cities_country", "cities", "country_id"),
    ("idx_employees_branch", "employees", "branch_id"),
    ("idx_employees_city", "employees", "city_id"),
    ("idx_vacations_employee", "vacations", "employee_id"),
    ("idx_overtimes_employee", "overtimes", "employee_id"),
    ("idx_medical_leaves_employee", "medical_leaves", "employee_id"),
    ("idx_user_roles_user", "user_roles", "user_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, table, column) in INDEXES {
            conn.execute_unprepared(&format!(
                "CREATE INDEX IF NOT EXISTS {name} ON {table}({column})"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
