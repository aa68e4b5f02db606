use crate::repository::errors::PatientRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PatientServiceError {
    #[error("validation failed for field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("patient not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<PatientRepositoryError> for PatientServiceError {
    fn from(err: PatientRepositoryError) -> Self {
        match err {
            PatientRepositoryError::NotFound => PatientServiceError::NotFound,
            PatientRepositoryError::Sqlx(e) => PatientServiceError::Internal(e.into()),
        }
    }
}
