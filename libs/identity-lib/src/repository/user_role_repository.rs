use async_trait::async_trait;
use sqlx::{query, MySqlPool};

use crate::repository::errors::{map_sqlx_error, IdentityRepositoryError};
use crate::repository::traits::UserRoleRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRoleRepository {
    pub pool: MySqlPool,
}

impl UserRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRoleRepositoryTrait for UserRoleRepository {
    async fn assign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError> {
        query(
            r#"
            INSERT INTO app_user_roles (user_id, role)
            VALUES (?, ?)
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn unassign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError> {
        let result = query(
            r#"
            DELETE FROM app_user_roles
            WHERE user_id = ? AND role = ?
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityRepositoryError::NotFound);
        }

        Ok(())
    }
}
