use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::repository::errors::{map_sqlx_error, IdentityRepositoryError};
use crate::repository::models::RoleRow;
use crate::repository::traits::RoleRepositoryTrait;

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pub pool: MySqlPool,
}

impl RoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    async fn create_role(&self, role: &str) -> Result<RoleRow, IdentityRepositoryError> {
        query(
            r#"
            INSERT INTO app_roles (role)
            VALUES (?)
            "#,
        )
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(RoleRow {
            role: role.to_string(),
        })
    }

    async fn find_role(&self, role: &str) -> Result<Option<RoleRow>, IdentityRepositoryError> {
        let row = query_as::<_, RoleRow>(
            r#"
            SELECT role FROM app_roles WHERE role = ?
            "#,
        )
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row)
    }

    async fn get_roles_for_user(&self, user_id: &str) -> Result<Vec<RoleRow>, IdentityRepositoryError> {
        let roles = query_as::<_, RoleRow>(
            r#"
            SELECT r.role
            FROM app_roles r
            INNER JOIN app_user_roles ur ON ur.role = r.role
            WHERE ur.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(roles)
    }
}
