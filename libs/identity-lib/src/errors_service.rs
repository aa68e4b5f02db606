use crate::password::PasswordHashError;
use crate::repository::errors::IdentityRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AccountServiceError {
    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("role already exists")]
    RoleAlreadyExists,

    #[error("user already has role")]
    UserAlreadyHasRole,

    #[error("resource not found")]
    NotFound,

    #[error("validation failed for field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error(transparent)]
    Password(#[from] PasswordHashError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<IdentityRepositoryError> for AccountServiceError {
    fn from(err: IdentityRepositoryError) -> Self {
        match err {
            IdentityRepositoryError::UsernameAlreadyExists => {
                AccountServiceError::UsernameAlreadyExists
            }
            IdentityRepositoryError::EmailAlreadyExists => AccountServiceError::EmailAlreadyExists,
            IdentityRepositoryError::RoleAlreadyExists => AccountServiceError::RoleAlreadyExists,
            IdentityRepositoryError::UserAlreadyHasRole => AccountServiceError::UserAlreadyHasRole,
            IdentityRepositoryError::NotFound => AccountServiceError::NotFound,
            IdentityRepositoryError::Sqlx(e) => AccountServiceError::Internal(e.into()),
        }
    }
}
