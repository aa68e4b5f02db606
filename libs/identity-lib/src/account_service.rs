use std::sync::Arc;

use uuid::Uuid;

use crate::entities::{AppRole, AppUser, Credentials};
use crate::errors_service::AccountServiceError;
use crate::password;
use crate::repository::models::{RoleRow, UserRow};
use crate::repository::traits::{
    RoleRepositoryTrait, UserRepositoryTrait, UserRoleRepositoryTrait,
};
use crate::repository::{RoleRepository, UserRepository, UserRoleRepository};

const MAX_ROLE_NAME_LENGTH: usize = 100;
const MAX_USERNAME_LENGTH: usize = 255;

fn validate_role_name(role: &str) -> Result<(), AccountServiceError> {
    let role = role.trim();
    if role.is_empty() {
        return Err(AccountServiceError::Validation {
            field: "role",
            reason: "role name cannot be empty".to_string(),
        });
    }
    if role.len() > MAX_ROLE_NAME_LENGTH {
        return Err(AccountServiceError::Validation {
            field: "role",
            reason: format!("role name cannot exceed {MAX_ROLE_NAME_LENGTH} characters"),
        });
    }
    Ok(())
}

fn validate_new_user(
    username: &str,
    raw_password: &str,
    email: &str,
    confirm_password: &str,
) -> Result<(), AccountServiceError> {
    if username.is_empty() {
        return Err(AccountServiceError::Validation {
            field: "username",
            reason: "username cannot be empty".to_string(),
        });
    }
    if username != username.trim() {
        return Err(AccountServiceError::Validation {
            field: "username",
            reason: "username cannot have surrounding whitespace".to_string(),
        });
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(AccountServiceError::Validation {
            field: "username",
            reason: format!("username cannot exceed {MAX_USERNAME_LENGTH} characters"),
        });
    }
    if raw_password.is_empty() {
        return Err(AccountServiceError::Validation {
            field: "password",
            reason: "password cannot be empty".to_string(),
        });
    }
    if raw_password != confirm_password {
        return Err(AccountServiceError::Validation {
            field: "confirm_password",
            reason: "passwords do not match".to_string(),
        });
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AccountServiceError::Validation {
            field: "email",
            reason: "email must be a valid address".to_string(),
        });
    }
    if email != email.trim() {
        return Err(AccountServiceError::Validation {
            field: "email",
            reason: "email cannot have surrounding whitespace".to_string(),
        });
    }
    Ok(())
}

fn role_from_row(row: RoleRow) -> AppRole {
    AppRole { role: row.role }
}

fn user_from_row(row: UserRow, roles: Vec<AppRole>) -> AppUser {
    AppUser {
        user_id: row.user_id,
        username: row.username,
        password_hash: row.password_hash,
        email: row.email,
        roles,
    }
}

#[derive(Debug, Clone)]
pub struct AccountService<U = UserRepository, R = RoleRepository, UR = UserRoleRepository>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
    UR: UserRoleRepositoryTrait,
{
    pub user_repo: Arc<U>,
    pub role_repo: Arc<R>,
    pub user_role_repo: Arc<UR>,
}

impl AccountService<UserRepository, RoleRepository, UserRoleRepository> {
    pub fn new(
        user_repo: UserRepository,
        role_repo: RoleRepository,
        user_role_repo: UserRoleRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            role_repo: Arc::new(role_repo),
            user_role_repo: Arc::new(user_role_repo),
        }
    }
}

impl<U, R, UR> AccountService<U, R, UR>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
    UR: UserRoleRepositoryTrait,
{
    pub fn with_repos(user_repo: Arc<U>, role_repo: Arc<R>, user_role_repo: Arc<UR>) -> Self {
        Self {
            user_repo,
            role_repo,
            user_role_repo,
        }
    }

    async fn fetch_roles_for_user(&self, user_id: &str) -> Result<Vec<AppRole>, AccountServiceError> {
        let rows = self
            .role_repo
            .get_roles_for_user(user_id)
            .await
            .map_err(AccountServiceError::from)?;
        Ok(rows.into_iter().map(role_from_row).collect())
    }

    /// Creates a role. Duplicate names error with `RoleAlreadyExists`
    /// (primary-key conflict); creation is not idempotent.
    pub async fn add_role(&self, role: &str) -> Result<AppRole, AccountServiceError> {
        validate_role_name(role)?;
        let row = self
            .role_repo
            .create_role(role.trim())
            .await
            .map_err(AccountServiceError::from)?;
        Ok(role_from_row(row))
    }

    /// Creates an account. The raw password is hashed before anything is
    /// written; username and email uniqueness are enforced by the store.
    pub async fn add_user(
        &self,
        username: &str,
        raw_password: &str,
        email: &str,
        confirm_password: &str,
    ) -> Result<AppUser, AccountServiceError> {
        validate_new_user(username, raw_password, email, confirm_password)?;

        let user_id = Uuid::new_v4().to_string();
        let password_hash = password::hash_password(raw_password)?;

        let row = self
            .user_repo
            .create_user(&user_id, username, &password_hash, email)
            .await
            .map_err(AccountServiceError::from)?;

        tracing::info!(user_id = %row.user_id, username = %row.username, "account created");

        Ok(user_from_row(row, vec![]))
    }

    /// Grants `role` to `username`. Fails with `NotFound` when either lookup
    /// misses and `UserAlreadyHasRole` when the grant already exists.
    pub async fn add_role_to_user(
        &self,
        username: &str,
        role: &str,
    ) -> Result<(), AccountServiceError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(AccountServiceError::from)?
            .ok_or(AccountServiceError::NotFound)?;

        let role = self
            .role_repo
            .find_role(role)
            .await
            .map_err(AccountServiceError::from)?
            .ok_or(AccountServiceError::NotFound)?;

        self.user_role_repo
            .assign_role(&user.user_id, &role.role)
            .await
            .map_err(AccountServiceError::from)
    }

    pub async fn remove_role_from_user(
        &self,
        username: &str,
        role: &str,
    ) -> Result<(), AccountServiceError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(AccountServiceError::from)?
            .ok_or(AccountServiceError::NotFound)?;

        self.user_role_repo
            .unassign_role(&user.user_id, role)
            .await
            .map_err(AccountServiceError::from)
    }

    /// Returns the user with roles eagerly loaded.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AppUser>, AccountServiceError> {
        let row = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(AccountServiceError::from)?;

        match row {
            Some(row) => {
                let roles = self.fetch_roles_for_user(&row.user_id).await?;
                Ok(Some(user_from_row(row, roles)))
            }
            None => Ok(None),
        }
    }

    /// The authentication contract: hash and granted role names for a
    /// username, or `NotFound`. The caller compares the presented password
    /// with `password::verify_password`.
    pub async fn load_credentials(&self, username: &str) -> Result<Credentials, AccountServiceError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(AccountServiceError::NotFound)?;

        Ok(Credentials {
            username: user.username,
            password_hash: user.password_hash,
            roles: user.roles.into_iter().map(|r| r.role).collect(),
        })
    }
}
