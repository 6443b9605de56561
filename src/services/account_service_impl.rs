//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::SecurityConfig;
use crate::constants::{messages, roles};
use crate::db::Store;
use crate::db::repositories::account::{
    generate_refresh_token, hash_password_blocking, verify_password,
};
use crate::entities::application_users;
use crate::models::{
    GeneralResponse, Login, LoginResponse, ManageUser, RefreshToken, Register, SystemRoleDto,
    UserProfile,
};
use crate::services::account_service::{AccountError, AccountService};
use crate::services::tokens::TokenIssuer;
use crate::services::validation::{
    validate_email, validate_full_name, validate_login, validate_password, validate_register,
};

const MODEL_EMPTY: &str = "Model is empty";
const USER_NOT_FOUND: &str = "User not found";
const USER_REGISTERED: &str = "User registered already";
const ROLE_NOT_FOUND: &str = "User role not found";

fn validation_failed(message: &str) -> String {
    format!("Validation failed: {message}")
}

pub struct SeaOrmAccountService {
    store: Store,
    tokens: TokenIssuer,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }

    /// Issues an access token and a refresh token for `user` and stores the
    /// refresh token as the user's only one.
    async fn issue_pair(
        &self,
        user: &application_users::Model,
        role: &str,
        message: &str,
    ) -> Result<LoginResponse, AccountError> {
        let token = self
            .tokens
            .issue(user.id, &user.full_name, &user.email, role)?;
        let refresh_token = generate_refresh_token();

        self.store
            .account_repo()
            .save_refresh_token(user.id, &refresh_token)
            .await?;

        Ok(LoginResponse::issued(message, token, refresh_token))
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn create(&self, form: Register) -> Result<GeneralResponse, AccountError> {
        info!("[create] Registering account");

        if form.full_name.is_empty() && form.email.is_empty() && form.password.is_empty() {
            error!("[create] {MODEL_EMPTY}");
            return Ok(GeneralResponse::fail(MODEL_EMPTY));
        }

        if let Err(message) = validate_register(&form) {
            warn!("[create] {message}");
            return Ok(GeneralResponse::fail(validation_failed(&message)));
        }

        let repo = self.store.account_repo();
        if repo.find_user_by_email(&form.email).await?.is_some() {
            warn!("[create] {USER_REGISTERED}");
            return Ok(GeneralResponse::fail(USER_REGISTERED));
        }

        let hash = hash_password_blocking(&form.password, &self.security).await?;
        let user = repo
            .create_user(form.full_name.trim(), form.email.trim(), hash)
            .await?;

        let role = if repo.find_role(roles::ADMIN).await?.is_none() {
            repo.ensure_role(roles::ADMIN).await?
        } else {
            repo.ensure_role(roles::USER).await?
        };
        repo.assign_role(user.id, role.id).await?;

        info!(user_id = user.id, role = %role.name, "[create] Account created");
        Ok(GeneralResponse::ok(messages::ACCOUNT_CREATED))
    }

    async fn sign_in(&self, form: Login) -> Result<LoginResponse, AccountError> {
        info!("[sign_in] Signing in");

        if form.email.is_empty() && form.password.is_empty() {
            error!("[sign_in] {MODEL_EMPTY}");
            return Ok(LoginResponse::fail(MODEL_EMPTY));
        }

        if let Err(message) = validate_login(&form) {
            warn!("[sign_in] {message}");
            return Ok(LoginResponse::fail(validation_failed(&message)));
        }

        let repo = self.store.account_repo();
        let Some(user) = repo.find_user_by_email(&form.email).await? else {
            warn!("[sign_in] {USER_NOT_FOUND}");
            return Ok(LoginResponse::fail(USER_NOT_FOUND));
        };

        if !verify_password(&form.password, &user.password).await? {
            warn!(user_id = user.id, "[sign_in] Password mismatch");
            return Ok(LoginResponse::fail("Email/Password not valid"));
        }

        let Some(role) = repo.role_name(user.id).await? else {
            error!(user_id = user.id, "[sign_in] {ROLE_NOT_FOUND}");
            return Ok(LoginResponse::fail(ROLE_NOT_FOUND));
        };

        let response = self.issue_pair(&user, &role, messages::LOGIN_SUCCESS).await?;
        info!(user_id = user.id, "[sign_in] Signed in");
        Ok(response)
    }

    async fn refresh(&self, form: RefreshToken) -> Result<LoginResponse, AccountError> {
        info!("[refresh] Refreshing token");

        if form.token.is_empty() {
            error!("[refresh] {MODEL_EMPTY}");
            return Ok(LoginResponse::fail(MODEL_EMPTY));
        }

        let repo = self.store.account_repo();
        let Some(stored) = repo.find_refresh_token(&form.token).await? else {
            warn!("[refresh] Unknown refresh token");
            return Ok(LoginResponse::fail("Refresh token is required"));
        };

        let Some(user) = repo.find_user(stored.user_id).await? else {
            error!(user_id = stored.user_id, "[refresh] Token owner not found");
            return Ok(LoginResponse::fail(
                "Refresh token could not be generated because user not found",
            ));
        };

        let Some(role) = repo.role_name(user.id).await? else {
            error!(user_id = user.id, "[refresh] {ROLE_NOT_FOUND}");
            return Ok(LoginResponse::fail(ROLE_NOT_FOUND));
        };

        let response = self
            .issue_pair(&user, &role, messages::TOKEN_REFRESHED)
            .await?;
        info!(user_id = user.id, "[refresh] Token refreshed");
        Ok(response)
    }

    async fn users(&self) -> Result<Vec<ManageUser>, AccountError> {
        let users = self.store.account_repo().list_users().await?;
        info!(count = users.len(), "[users] Retrieved users");
        Ok(users)
    }

    async fn roles(&self) -> Result<Vec<SystemRoleDto>, AccountError> {
        let roles = self.store.account_repo().list_roles().await?;
        Ok(roles.into_iter().map(SystemRoleDto::from).collect())
    }

    async fn update_user(&self, user: ManageUser) -> Result<GeneralResponse, AccountError> {
        info!(user_id = user.user_id, "[update_user] Changing role");

        if user.role.is_empty() {
            error!("[update_user] {MODEL_EMPTY}");
            return Ok(GeneralResponse::fail(MODEL_EMPTY));
        }

        let repo = self.store.account_repo();
        let Some(role) = repo.find_role(&user.role).await? else {
            warn!(role = %user.role, "[update_user] Role not found");
            return Ok(GeneralResponse::fail(format!(
                "Role '{}' not found",
                user.role
            )));
        };

        let Some(user_role) = repo.user_role(user.user_id).await? else {
            warn!(user_id = user.user_id, "[update_user] {ROLE_NOT_FOUND}");
            return Ok(GeneralResponse::fail(format!(
                "User role not found for user ID: {}",
                user.user_id
            )));
        };

        repo.set_user_role(user_role, role.id).await?;
        info!(user_id = user.user_id, role = %role.name, "[update_user] Role changed");
        Ok(GeneralResponse::ok("User role updated successfully"))
    }

    async fn delete_user(&self, id: i32) -> Result<GeneralResponse, AccountError> {
        info!(user_id = id, "[delete_user] Deleting user");

        if !self.store.account_repo().delete_user(id).await? {
            warn!(user_id = id, "[delete_user] {USER_NOT_FOUND}");
            return Ok(GeneralResponse::fail(format!("User with ID {id} not found")));
        }

        info!(user_id = id, "[delete_user] User deleted");
        Ok(GeneralResponse::ok("User successfully deleted"))
    }

    async fn user_profile(&self, id: i32) -> Result<UserProfile, AccountError> {
        let repo = self.store.account_repo();
        let user = repo.find_user(id).await?.ok_or_else(|| {
            warn!(user_id = id, "[user_profile] {USER_NOT_FOUND}");
            AccountError::UserNotFound
        })?;

        let role = repo.role_name(id).await?;

        Ok(UserProfile {
            id: user.id,
            role,
            full_name: Some(user.full_name),
            email: Some(user.email),
            password: None,
            confirm_password: None,
        })
    }

    async fn update_user_profile(
        &self,
        profile: UserProfile,
    ) -> Result<GeneralResponse, AccountError> {
        info!(user_id = profile.id, "[update_user_profile] Updating profile");

        if profile.full_name.is_none() && profile.email.is_none() && profile.password.is_none() {
            error!("[update_user_profile] {MODEL_EMPTY}");
            return Ok(GeneralResponse::fail(MODEL_EMPTY));
        }

        let checks = [
            profile.full_name.as_deref().map(validate_full_name),
            profile.email.as_deref().map(validate_email),
            profile
                .password
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(validate_password),
        ];
        if let Some(Err(message)) = checks.into_iter().flatten().find(Result::is_err) {
            warn!("[update_user_profile] {message}");
            return Ok(GeneralResponse::fail(validation_failed(&message)));
        }

        let password = profile.password.filter(|p| !p.is_empty());
        if let Some(password) = &password
            && profile.confirm_password.as_deref() != Some(password.as_str())
        {
            return Ok(GeneralResponse::fail(validation_failed(
                "Passwords do not match",
            )));
        }

        let repo = self.store.account_repo();
        let Some(user) = repo.find_user(profile.id).await? else {
            warn!(user_id = profile.id, "[update_user_profile] {USER_NOT_FOUND}");
            return Ok(GeneralResponse::fail(USER_NOT_FOUND));
        };

        if let Some(email) = &profile.email
            && let Some(owner) = repo.find_user_by_email(email).await?
            && owner.id != user.id
        {
            warn!(user_id = user.id, "[update_user_profile] {USER_REGISTERED}");
            return Ok(GeneralResponse::fail(USER_REGISTERED));
        }

        let hash = match password {
            Some(password) => Some(hash_password_blocking(&password, &self.security).await?),
            None => None,
        };

        repo.update_user_details(
            user,
            profile.full_name.map(|n| n.trim().to_string()),
            profile.email.map(|e| e.trim().to_string()),
            hash,
        )
        .await?;

        info!(user_id = profile.id, "[update_user_profile] Profile updated");
        Ok(GeneralResponse::ok("User profile updated successfully"))
    }
}
