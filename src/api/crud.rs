//! One parameterized controller serving every `/api/{entity}` path.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse};
use crate::models::GeneralResponse;
use crate::services::{CrudService, LeaveService};

type Service<T> = Arc<dyn CrudService<T>>;

/// `GET /`, `GET /{id}`, `POST /`, `PUT /` and `DELETE /{id}` over `service`.
pub fn routes<T, S>(service: Service<T>) -> Router<S>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(get_all::<T>).post(insert::<T>).put(update::<T>))
        .route("/{id}", get(get_by_id::<T>).delete(delete_by_id::<T>))
        .with_state(service)
}

/// [`routes`] plus `GET /employee/{employee_id}`.
pub fn leave_routes<T, S>(crud: Service<T>, leave: Arc<dyn LeaveService<T>>) -> Router<S>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/employee/{employee_id}", get(list_for_employee::<T>))
        .with_state(leave)
        .merge(routes(crud))
}

async fn get_all<T>(State(service): State<Service<T>>) -> Result<Json<ApiResponse<Vec<T>>>, ApiError>
where
    T: Serialize + Send + 'static,
{
    let items = service.get_all().await?;
    Ok(Json(ApiResponse::success(items)))
}

async fn get_by_id<T>(
    State(service): State<Service<T>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<T>>, ApiError>
where
    T: Serialize + Send + 'static,
{
    let id = validate_id(id)?;
    let item = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

async fn insert<T>(
    State(service): State<Service<T>>,
    Json(item): Json<T>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError>
where
    T: DeserializeOwned + Send + 'static,
{
    let outcome = service.insert(item).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

async fn update<T>(
    State(service): State<Service<T>>,
    Json(item): Json<T>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError>
where
    T: DeserializeOwned + Send + 'static,
{
    let outcome = service.update(item).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

async fn delete_by_id<T>(
    State(service): State<Service<T>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError>
where
    T: Send + 'static,
{
    let id = validate_id(id)?;
    let outcome = service.delete_by_id(id).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

async fn list_for_employee<T>(
    State(service): State<Arc<dyn LeaveService<T>>>,
    Path(employee_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<T>>>, ApiError>
where
    T: Serialize + Send + 'static,
{
    let employee_id = validate_id(employee_id)?;
    let items = service.list_for_employee(employee_id).await?;
    Ok(Json(ApiResponse::success(items)))
}
