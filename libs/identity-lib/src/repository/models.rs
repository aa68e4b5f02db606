use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub role: String,
}
