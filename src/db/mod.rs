use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, IntoActiveModel,
    PrimaryKeyTrait, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::account::AccountRepository;
pub use repositories::crud::{Catalog, CrudRepository, DeleteOutcome, InsertOutcome, UpdateOutcome};
pub use repositories::employee::EmployeeRepository;
pub use repositories::leave::LeaveRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        // Every pooled connection of an in-memory database is its own
        // database, so the pool is pinned to a single connection.
        if db_url.contains(":memory:") {
            opt.max_connections(1).min_connections(1);
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn crud<E>(&self) -> CrudRepository<E>
    where
        E: Catalog,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        CrudRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn employee_repo(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn leave_repo(&self) -> LeaveRepository {
        LeaveRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn account_repo(&self) -> AccountRepository {
        AccountRepository::new(self.conn.clone())
    }
}
