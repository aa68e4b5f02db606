use async_trait::async_trait;

use crate::repository::errors::IdentityRepositoryError;
use crate::repository::models::{RoleRow, UserRow};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(
        &self,
        user_id: &str,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<UserRow, IdentityRepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, IdentityRepositoryError>;
}

#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn create_role(&self, role: &str) -> Result<RoleRow, IdentityRepositoryError>;
    async fn find_role(&self, role: &str) -> Result<Option<RoleRow>, IdentityRepositoryError>;
    async fn get_roles_for_user(&self, user_id: &str) -> Result<Vec<RoleRow>, IdentityRepositoryError>;
}

#[async_trait]
pub trait UserRoleRepositoryTrait: Send + Sync {
    async fn assign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError>;
    async fn unassign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError>;
}
