#[derive(Debug)]
pub enum PatientRepositoryError {
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for PatientRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientRepositoryError::NotFound => write!(f, "patient not found"),
            PatientRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PatientRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatientRepositoryError::NotFound => None,
            PatientRepositoryError::Sqlx(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for PatientRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => PatientRepositoryError::NotFound,
            other => PatientRepositoryError::Sqlx(other),
        }
    }
}
