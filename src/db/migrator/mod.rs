use sea_orm_migration::prelude::*;

mod m20240314_initial;
mod m20240315_add_accounts;
mod m20240321_add_foreign_key_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240314_initial::Migration),
            Box::new(m20240315_add_accounts::Migration),
            Box::new(m20240321_add_foreign_key_indexes::Migration),
        ]
    }
}
