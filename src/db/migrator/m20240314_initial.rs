use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        let tables = [
            schema.create_table_from_entity(GeneralDepartments),
            schema.create_table_from_entity(Departments),
            schema.create_table_from_entity(Branches),
            schema.create_table_from_entity(Countries),
            schema.create_table_from_entity(Cities),
            schema.create_table_from_entity(Employees),
            schema.create_table_from_entity(VacationTypes),
            schema.create_table_from_entity(Vacations),
            schema.create_table_from_entity(OvertimeTypes),
            schema.create_table_from_entity(Overtimes),
            schema.create_table_from_entity(MedicalLeaves),
        ];

        for mut table in tables {
            manager.create_table(table.if_not_exists().to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicalLeaves).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Overtimes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OvertimeTypes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vacations).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VacationTypes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Branches).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralDepartments).to_owned())
            .await?;

        Ok(())
    }
}
