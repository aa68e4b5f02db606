use std::sync::Arc;

use crate::entities::{PaginatedResult, PaginationParams, Patient};
use crate::errors_service::PatientServiceError;
use crate::repository::models::PatientRow;
use crate::repository::traits::PatientRepositoryTrait;
use crate::repository::PatientRepository;

const MIN_NAME_LENGTH: usize = 4;
const MAX_NAME_LENGTH: usize = 40;
const MIN_SCORE: i32 = 100;

fn validate_patient(patient: &Patient) -> Result<(), PatientServiceError> {
    if patient.name.trim().is_empty() {
        return Err(PatientServiceError::Validation {
            field: "name",
            reason: "name cannot be empty".to_string(),
        });
    }
    let length = patient.name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(PatientServiceError::Validation {
            field: "name",
            reason: format!(
                "name length must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
            ),
        });
    }
    if patient.score < MIN_SCORE {
        return Err(PatientServiceError::Validation {
            field: "score",
            reason: format!("score must be at least {MIN_SCORE}"),
        });
    }
    Ok(())
}

fn patient_from_row(row: PatientRow) -> Patient {
    Patient {
        id: Some(row.id),
        name: row.name,
        birth_date: row.birth_date,
        is_sick: row.is_sick,
        score: row.score,
    }
}

#[derive(Debug, Clone)]
pub struct PatientService<P = PatientRepository>
where
    P: PatientRepositoryTrait,
{
    pub repo: Arc<P>,
}

impl PatientService<PatientRepository> {
    pub fn new(repo: PatientRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl<P> PatientService<P>
where
    P: PatientRepositoryTrait,
{
    pub fn with_repo(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Validates the record, then inserts it when `id` is unset or updates
    /// the existing row otherwise. Returns the persisted record with its id.
    pub async fn save(&self, patient: Patient) -> Result<Patient, PatientServiceError> {
        validate_patient(&patient)?;

        let row = match patient.id {
            None => self.repo.insert(&patient).await?,
            Some(id) => self.repo.update(id, &patient).await?,
        };

        Ok(patient_from_row(row))
    }

    pub async fn get_patient(&self, id: u64) -> Result<Option<Patient>, PatientServiceError> {
        let row = self.repo.find_by_id(id).await?;
        Ok(row.map(patient_from_row))
    }

    pub async fn get_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(patient_from_row).collect())
    }

    pub async fn search(
        &self,
        keyword: &str,
        pagination: PaginationParams,
    ) -> Result<PaginatedResult<Patient>, PatientServiceError> {
        let (rows, total) = self.repo.search_by_name(keyword, pagination).await?;
        let items: Vec<Patient> = rows.into_iter().map(patient_from_row).collect();
        // A zero page_size selects nothing, so there are no pages to count.
        let total_pages = if pagination.page_size == 0 {
            0
        } else {
            ((total as f64) / (pagination.page_size as f64)).ceil() as u32
        };
        Ok(PaginatedResult {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        })
    }

    /// Deleting an id that does not exist fails with `NotFound`.
    pub async fn delete_patient(&self, id: u64) -> Result<(), PatientServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(PatientServiceError::from)
    }
}
