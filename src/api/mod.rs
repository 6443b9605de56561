use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use sea_orm::{IntoActiveModel, PrimaryKeyTrait};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{Catalog, Store};
use crate::entities::{
    branches, cities, countries, departments, general_departments, medical_leaves,
    overtime_types, overtimes, vacation_types, vacations,
};
use crate::models::{EmployeeDetails, MedicalLeaveDto, OvertimeDto, VacationDto};
use crate::services::{
    AccountService, LeaveKind, SeaOrmAccountService, SeaOrmCrudService, SeaOrmEmployeeService,
    SeaOrmLeaveService, TokenIssuer,
};

pub mod auth;
mod authentication;
mod crud;
mod error;
mod observability;
mod types;
mod validation;

pub use error::ApiError;
pub use observability::logging_middleware;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: TokenIssuer,

    pub accounts: Arc<dyn AccountService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, store: Store, prometheus_handle: Option<PrometheusHandle>) -> Self {
        let tokens = TokenIssuer::new(&config.jwt);
        let accounts = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            tokens.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            tokens,
            accounts,
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }
    }
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState::new(config, store, prometheus_handle)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(create_admin_router(state.clone()))
        .merge(create_protected_router(state.clone()))
        .route("/authentication/register", post(authentication::register))
        .route("/authentication/login", post(authentication::login))
        .route(
            "/authentication/refresh-token",
            post(authentication::refresh_token),
        )
        .route("/health-check", get(observability::health_check))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}

/// User management, Admin role only.
fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/authentication/users", get(authentication::users))
        .route("/authentication/roles", get(authentication::roles))
        .route(
            "/authentication/update-user",
            put(authentication::update_user),
        )
        .route(
            "/authentication/delete-user/{id}",
            delete(authentication::delete_user),
        )
        .route_layer(middleware::from_fn(auth::require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

/// Entity controllers and the caller's own profile, any signed-in user.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let store = &state.store;

    Router::new()
        .route(
            "/authentication/user-profile/{id}",
            get(authentication::user_profile),
        )
        .route(
            "/authentication/update-profile",
            put(authentication::update_profile),
        )
        .nest(
            "/generaldepartment",
            catalog::<general_departments::Entity>(store),
        )
        .nest("/department", catalog::<departments::Entity>(store))
        .nest("/branch", catalog::<branches::Entity>(store))
        .nest("/country", catalog::<countries::Entity>(store))
        .nest("/city", catalog::<cities::Entity>(store))
        .nest("/vacationtype", catalog::<vacation_types::Entity>(store))
        .nest("/overtimetype", catalog::<overtime_types::Entity>(store))
        .nest(
            "/employee",
            crud::routes::<EmployeeDetails, _>(Arc::new(SeaOrmEmployeeService::new(
                store.clone(),
            ))),
        )
        .nest("/vacation", leave::<vacations::Entity, VacationDto>(store))
        .nest("/overtime", leave::<overtimes::Entity, OvertimeDto>(store))
        .nest(
            "/health",
            leave::<medical_leaves::Entity, MedicalLeaveDto>(store),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
}

fn catalog<E>(store: &Store) -> Router<Arc<AppState>>
where
    E: Catalog,
    E::Model: IntoActiveModel<E::ActiveModel> + Serialize + DeserializeOwned + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    crud::routes::<E::Model, _>(Arc::new(SeaOrmCrudService::<E>::new(store.clone())))
}

fn leave<E, T>(store: &Store) -> Router<Arc<AppState>>
where
    E: LeaveKind<Dto = T>,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let service = Arc::new(SeaOrmLeaveService::<E>::new(store.clone()));
    crud::leave_routes::<T, _>(service.clone(), service)
}
