//! Five-operation contract shared by every catalog and leave endpoint.
//!
//! Mutations report domain outcomes (not found, duplicate) as a
//! [`GeneralResponse`] with `flag == false`. Only infrastructure faults
//! surface as [`CrudError`].

use thiserror::Error;

use crate::models::GeneralResponse;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CrudError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CrudError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[must_use]
pub fn not_found(label: &str) -> GeneralResponse {
    GeneralResponse::fail(format!("Sorry {label} not found"))
}

#[must_use]
pub fn duplicate(label: &str) -> GeneralResponse {
    GeneralResponse::fail(format!("{label} already added"))
}

#[async_trait::async_trait]
pub trait CrudService<T>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, CrudError>;

    /// # Errors
    ///
    /// Returns [`CrudError::NotFound`] when no row has this id.
    async fn get_by_id(&self, id: i32) -> Result<T, CrudError>;

    async fn insert(&self, item: T) -> Result<GeneralResponse, CrudError>;

    /// Overwrites the mutable fields of the row identified by `item`'s id.
    async fn update(&self, item: T) -> Result<GeneralResponse, CrudError>;

    async fn delete_by_id(&self, id: i32) -> Result<GeneralResponse, CrudError>;
}

/// Leave records can additionally be listed per employee.
#[async_trait::async_trait]
pub trait LeaveService<T>: CrudService<T> {
    async fn list_for_employee(&self, employee_id: i32) -> Result<Vec<T>, CrudError>;
}
