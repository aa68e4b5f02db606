#[derive(Debug)]
pub enum IdentityRepositoryError {
    UsernameAlreadyExists,
    EmailAlreadyExists,
    RoleAlreadyExists,
    UserAlreadyHasRole,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for IdentityRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityRepositoryError::UsernameAlreadyExists => write!(f, "username already exists"),
            IdentityRepositoryError::EmailAlreadyExists => write!(f, "email already exists"),
            IdentityRepositoryError::RoleAlreadyExists => write!(f, "role already exists"),
            IdentityRepositoryError::UserAlreadyHasRole => write!(f, "user already has role"),
            IdentityRepositoryError::NotFound => write!(f, "not found"),
            IdentityRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IdentityRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentityRepositoryError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for IdentityRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Maps MySQL integrity violations onto typed conflicts.
///
/// MySQL duplicate key violations surface as SQLSTATE 23000 with a message of
/// the form "Duplicate entry '...' for key 'table.key_name'". The key name is
/// a named UNIQUE constraint for username/email, and `PRIMARY` for the role
/// and user-role tables.
pub fn map_sqlx_error(err: sqlx::Error) -> IdentityRepositoryError {
    const USERNAME_UNIQUE: &str = "app_users_username_unique";
    const EMAIL_UNIQUE: &str = "app_users_email_unique";
    const ROLES_PK: &str = "app_roles.primary";
    const USER_ROLES_PK: &str = "app_user_roles.primary";

    if let sqlx::Error::Database(db_err) = &err {
        let msg = db_err.message().to_lowercase();
        let is_duplicate_key = db_err.code().as_deref() == Some("23000")
            && msg.contains("duplicate entry")
            && msg.contains("for key");

        if is_duplicate_key {
            // MySQL may prefix the key with the table name
            // (e.g. "app_users.app_users_username_unique"), hence `ends_with`.
            let key = extract_mysql_key_name(&msg).unwrap_or_default();

            if key.ends_with(USERNAME_UNIQUE) || msg.contains(USERNAME_UNIQUE) {
                return IdentityRepositoryError::UsernameAlreadyExists;
            }

            if key.ends_with(EMAIL_UNIQUE) || msg.contains(EMAIL_UNIQUE) {
                return IdentityRepositoryError::EmailAlreadyExists;
            }

            if key.ends_with(ROLES_PK) {
                return IdentityRepositoryError::RoleAlreadyExists;
            }

            if key.ends_with(USER_ROLES_PK) {
                return IdentityRepositoryError::UserAlreadyHasRole;
            }
        }
    }

    IdentityRepositoryError::Sqlx(err)
}
