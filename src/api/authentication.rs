//! `/api/authentication` handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::models::{
    GeneralResponse, Login, LoginResponse, ManageUser, RefreshToken, Register, SystemRoleDto,
    UserProfile,
};
use crate::services::Claims;

/// POST /authentication/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<Register>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError> {
    let outcome = state.accounts.create(form).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /authentication/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<Login>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.accounts.sign_in(form).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /authentication/refresh-token
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RefreshToken>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.accounts.refresh(form).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// GET /authentication/users
pub async fn users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ManageUser>>>, ApiError> {
    let users = state.accounts.users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /authentication/roles
pub async fn roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SystemRoleDto>>>, ApiError> {
    let roles = state.accounts.roles().await?;
    Ok(Json(ApiResponse::success(roles)))
}

/// PUT /authentication/update-user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<ManageUser>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError> {
    let outcome = state.accounts.update_user(user).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// DELETE /authentication/delete-user/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError> {
    let id = validate_id(id)?;
    let outcome = state.accounts.delete_user(id).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// GET /authentication/user-profile/{id}
/// Users may read their own profile; admins may read any.
pub async fn user_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let id = validate_id(id)?;
    ensure_self_or_admin(&claims, id)?;

    let profile = state.accounts.user_profile(id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// PUT /authentication/update-profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ApiResponse<GeneralResponse>>, ApiError> {
    ensure_self_or_admin(&claims, profile.id)?;

    let outcome = state.accounts.update_user_profile(profile).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

fn ensure_self_or_admin(claims: &Claims, user_id: i32) -> Result<(), ApiError> {
    if claims.is_admin() || claims.user_id() == Some(user_id) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Cannot access another user's profile"))
    }
}
