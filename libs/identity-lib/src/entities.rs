use serde::{Deserialize, Serialize};

/// A named permission scope. The role name is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppRole {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppUser {
    pub user_id: String,
    pub username: String,
    /// Argon2 PHC string; never the plaintext password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub roles: Vec<AppRole>,
}

/// Credential-lookup result handed to the authorization layer: it compares a
/// presented password against `password_hash` and maps `roles` to grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}
