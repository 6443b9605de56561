use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine as _, engine::general_purpose};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use tokio::task;

use crate::config::SecurityConfig;
use crate::constants::tokens::REFRESH_TOKEN_BYTES;
use crate::entities::{application_users, refresh_tokens, system_roles, user_roles};
use crate::models::ManageUser;

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Case-insensitive e-mail lookup.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<application_users::Model>> {
        let wanted = email.trim().to_lowercase();
        let users = application_users::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to query users by email")?;

        Ok(users
            .into_iter()
            .find(|u| u.email.trim().to_lowercase() == wanted))
    }

    pub async fn find_user(&self, id: i32) -> Result<Option<application_users::Model>> {
        application_users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<application_users::Model> {
        let active = application_users::ActiveModel {
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            password: Set(password_hash),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")
    }

    pub async fn update_user_details(
        &self,
        user: application_users::Model,
        full_name: Option<String>,
        email: Option<String>,
        password_hash: Option<String>,
    ) -> Result<application_users::Model> {
        let mut active: application_users::ActiveModel = user.into();
        if let Some(full_name) = full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(hash) = password_hash {
            active.password = Set(hash);
        }

        active
            .update(&self.conn)
            .await
            .context("Failed to update user profile")
    }

    /// Removes the user together with its role assignment and refresh token.
    /// Returns `false` when no such user exists.
    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let result = application_users::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete user")?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn find_role(&self, name: &str) -> Result<Option<system_roles::Model>> {
        system_roles::Entity::find()
            .filter(system_roles::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name")
    }

    /// Returns the role with this name, creating it first when missing.
    pub async fn ensure_role(&self, name: &str) -> Result<system_roles::Model> {
        if let Some(role) = self.find_role(name).await? {
            return Ok(role);
        }

        let active = system_roles::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create role {name}"))
    }

    pub async fn list_roles(&self) -> Result<Vec<system_roles::Model>> {
        system_roles::Entity::find()
            .order_by_asc(system_roles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<user_roles::Model> {
        let active = user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to assign role")
    }

    pub async fn user_role(&self, user_id: i32) -> Result<Option<user_roles::Model>> {
        user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query user role")
    }

    pub async fn set_user_role(&self, user_role: user_roles::Model, role_id: i32) -> Result<()> {
        let mut active: user_roles::ActiveModel = user_role.into();
        active.role_id = Set(role_id);
        active
            .update(&self.conn)
            .await
            .context("Failed to update user role")?;
        Ok(())
    }

    /// Name of the role assigned to a user, if any.
    pub async fn role_name(&self, user_id: i32) -> Result<Option<String>> {
        let Some(user_role) = self.user_role(user_id).await? else {
            return Ok(None);
        };

        let role = system_roles::Entity::find_by_id(user_role.role_id)
            .one(&self.conn)
            .await
            .context("Failed to query role")?;

        Ok(role.map(|r| r.name))
    }

    /// Users joined with their role names. Users without a role are listed
    /// with an empty role.
    pub async fn list_users(&self) -> Result<Vec<ManageUser>> {
        let users = application_users::Entity::find()
            .order_by_asc(application_users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        let role_names: HashMap<i32, String> = self
            .list_roles()
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();

        let assignments: HashMap<i32, i32> = user_roles::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list user roles")?
            .into_iter()
            .map(|ur| (ur.user_id, ur.role_id))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| ManageUser {
                role: assignments
                    .get(&user.id)
                    .and_then(|role_id| role_names.get(role_id))
                    .cloned()
                    .unwrap_or_default(),
                user_id: user.id,
                name: user.full_name,
                email: user.email,
            })
            .collect())
    }

    pub async fn find_refresh_token(&self, token: &str) -> Result<Option<refresh_tokens::Model>> {
        refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::Token.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query refresh token")
    }

    /// Stores `token` as the user's only refresh token.
    pub async fn save_refresh_token(&self, user_id: i32, token: &str) -> Result<()> {
        let existing = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query refresh token by user")?;

        match existing {
            Some(row) => {
                let mut active: refresh_tokens::ActiveModel = row.into();
                active.token = Set(token.to_string());
                active.update(&self.conn).await?;
            }
            None => {
                let active = refresh_tokens::ActiveModel {
                    user_id: Set(user_id),
                    token: Set(token.to_string()),
                    ..Default::default()
                };
                active.insert(&self.conn).await?;
            }
        }

        Ok(())
    }

    pub async fn refresh_token_of(&self, user_id: i32) -> Result<Option<String>> {
        let row = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query refresh token by user")?;

        Ok(row.map(|r| r.token))
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Runs [`hash_password`] off the async runtime.
pub async fn hash_password_blocking(password: &str, config: &SecurityConfig) -> Result<String> {
    let password = password.to_string();
    let config = config.clone();

    task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .context("Password hashing task panicked")?
}

/// Checks `password` against a stored PHC hash off the async runtime.
/// Parameters are read from the hash itself.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        Ok::<bool, anyhow::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")?
}

/// Opaque refresh token: random bytes, base64 encoded.
#[must_use]
pub fn generate_refresh_token() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password_blocking("Secret#123", &cheap_params())
            .await
            .unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret#123", &hash).await.unwrap());
        assert!(!verify_password("secret#123", &hash).await.unwrap());
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();

        assert_ne!(a, b);
        assert_eq!(
            general_purpose::STANDARD.decode(&a).unwrap().len(),
            REFRESH_TOKEN_BYTES
        );
    }
}
