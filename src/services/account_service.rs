//! Domain service for registration, sign-in, token refresh and user
//! management.

use thiserror::Error;

use crate::models::{
    GeneralResponse, Login, LoginResponse, ManageUser, RefreshToken, Register, SystemRoleDto,
    UserProfile,
};

/// Faults that are not a domain outcome. Rejections such as a wrong password
/// are reported through the response `flag` instead.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<jsonwebtoken::errors::Error> for AccountError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Token(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Registers a user. The first account gets the Admin role, later ones
    /// get User.
    async fn create(&self, form: Register) -> Result<GeneralResponse, AccountError>;

    /// Verifies credentials and issues an access token plus a refresh token.
    async fn sign_in(&self, form: Login) -> Result<LoginResponse, AccountError>;

    /// Exchanges a stored refresh token for a fresh token pair. An unknown
    /// token changes nothing.
    async fn refresh(&self, form: RefreshToken) -> Result<LoginResponse, AccountError>;

    async fn users(&self) -> Result<Vec<ManageUser>, AccountError>;

    async fn roles(&self) -> Result<Vec<SystemRoleDto>, AccountError>;

    async fn update_user(&self, user: ManageUser) -> Result<GeneralResponse, AccountError>;

    async fn delete_user(&self, id: i32) -> Result<GeneralResponse, AccountError>;

    /// # Errors
    ///
    /// Returns [`AccountError::UserNotFound`] for an unknown id.
    async fn user_profile(&self, id: i32) -> Result<UserProfile, AccountError>;

    async fn update_user_profile(
        &self,
        profile: UserProfile,
    ) -> Result<GeneralResponse, AccountError>;
}
