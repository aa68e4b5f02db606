use async_trait::async_trait;

use crate::entities::{PaginationParams, Patient};
use crate::repository::errors::PatientRepositoryError;
use crate::repository::models::PatientRow;

#[async_trait]
pub trait PatientRepositoryTrait: Send + Sync {
    async fn insert(&self, patient: &Patient) -> Result<PatientRow, PatientRepositoryError>;
    async fn update(&self, id: u64, patient: &Patient) -> Result<PatientRow, PatientRepositoryError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<PatientRow>, PatientRepositoryError>;
    async fn find_all(&self) -> Result<Vec<PatientRow>, PatientRepositoryError>;
    /// Substring search on `name`, paged. Returns the page rows and the
    /// total number of matching rows.
    async fn search_by_name(
        &self,
        keyword: &str,
        pagination: PaginationParams,
    ) -> Result<(Vec<PatientRow>, u64), PatientRepositoryError>;
    async fn delete_by_id(&self, id: u64) -> Result<(), PatientRepositoryError>;
}
