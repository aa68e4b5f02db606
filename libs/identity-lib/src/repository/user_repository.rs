use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::repository::errors::IdentityRepositoryError;
use crate::repository::models::UserRow;
use crate::repository::traits::UserRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(
        &self,
        user_id: &str,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<UserRow, IdentityRepositoryError> {
        query(
            r#"
            INSERT INTO app_users (user_id, username, password_hash, email)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(IdentityRepositoryError::from)?;

        let user = query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, email
            FROM app_users WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(IdentityRepositoryError::from)?;

        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, IdentityRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash, email
            FROM app_users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(IdentityRepositoryError::from)?;

        Ok(user)
    }
}
