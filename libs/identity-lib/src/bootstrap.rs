/// Start-up provisioning: seeds the USER and ADMIN roles and the initial
/// administrator account. Safe to run on every boot; existing roles and an
/// existing admin account are left untouched.
use crate::entities::AppUser;
use crate::errors_service::AccountServiceError;
use crate::repository::traits::{
    RoleRepositoryTrait, UserRepositoryTrait, UserRoleRepositoryTrait,
};
use crate::AccountService;

pub const USER_ROLE: &str = "USER";
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone)]
pub struct AdminBootstrapConfig {
    pub username: String,
    pub email: String,
}

impl AdminBootstrapConfig {
    /// Load admin account settings from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let email = std::env::var("ADMIN_EMAIL")
            .map_err(|_| "ADMIN_EMAIL environment variable not set")?;

        if email.is_empty() {
            return Err("ADMIN_EMAIL cannot be empty".to_string());
        }

        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

        Ok(Self { username, email })
    }

    /// The admin password is read separately so it never sits in the config
    /// struct longer than needed.
    pub fn password_from_env() -> Result<String, String> {
        let password = std::env::var("ADMIN_PASSWORD")
            .map_err(|_| "ADMIN_PASSWORD environment variable not set")?;

        if password.is_empty() {
            return Err("ADMIN_PASSWORD cannot be empty".to_string());
        }

        Ok(password)
    }
}

/// Ensures the USER and ADMIN roles exist, then creates the admin account
/// and grants it both roles. Returns the admin account, created or existing.
pub async fn initialize_admin_account<U, R, UR>(
    accounts: &AccountService<U, R, UR>,
    config: &AdminBootstrapConfig,
    raw_password: &str,
) -> Result<AppUser, AccountServiceError>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
    UR: UserRoleRepositoryTrait,
{
    for role in [USER_ROLE, ADMIN_ROLE] {
        match accounts.add_role(role).await {
            Ok(_) => tracing::info!(role, "role created"),
            Err(AccountServiceError::RoleAlreadyExists) => {
                tracing::info!(role, "role already exists");
            }
            Err(e) => return Err(e),
        }
    }

    match accounts.find_by_username(&config.username).await? {
        Some(existing) => {
            tracing::info!(
                user_id = %existing.user_id,
                username = %existing.username,
                "admin account already exists"
            );
        }
        None => {
            tracing::info!(
                username = %config.username,
                email = %config.email,
                "creating admin account"
            );
            accounts
                .add_user(&config.username, raw_password, &config.email, raw_password)
                .await?;
        }
    }

    // The grants run for an existing account too, so a boot that died
    // between account creation and role assignment is repaired here.
    for role in [USER_ROLE, ADMIN_ROLE] {
        match accounts.add_role_to_user(&config.username, role).await {
            Ok(()) => {}
            Err(AccountServiceError::UserAlreadyHasRole) => {
                tracing::info!(username = %config.username, role, "admin already holds role");
            }
            Err(e) => return Err(e),
        }
    }

    let admin = accounts
        .find_by_username(&config.username)
        .await?
        .ok_or(AccountServiceError::NotFound)?;

    tracing::info!(user_id = %admin.user_id, "admin account initialized");

    Ok(admin)
}
