use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySqlPool};

use crate::entities::{PaginationParams, Patient};
use crate::repository::errors::PatientRepositoryError;
use crate::repository::models::PatientRow;
use crate::repository::traits::PatientRepositoryTrait;

#[derive(Debug, Clone)]
pub struct PatientRepository {
    pub pool: MySqlPool,
}

impl PatientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_row(&self, id: u64) -> Result<PatientRow, PatientRepositoryError> {
        let row = query_as::<_, PatientRow>(
            r#"
            SELECT id, name, birth_date, is_sick, score FROM patients WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        Ok(row)
    }
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn insert(&self, patient: &Patient) -> Result<PatientRow, PatientRepositoryError> {
        let result = query(
            r#"
            INSERT INTO patients (name, birth_date, is_sick, score)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&patient.name)
        .bind(patient.birth_date)
        .bind(patient.is_sick)
        .bind(patient.score)
        .execute(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        self.fetch_row(result.last_insert_id()).await
    }

    async fn update(&self, id: u64, patient: &Patient) -> Result<PatientRow, PatientRepositoryError> {
        let result = query(
            r#"
            UPDATE patients
            SET name = ?, birth_date = ?, is_sick = ?, score = ?
            WHERE id = ?
            "#,
        )
        .bind(&patient.name)
        .bind(patient.birth_date)
        .bind(patient.is_sick)
        .bind(patient.score)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        // rows_affected is 0 both for a missing row and for a no-op update,
        // so existence is re-checked with a select.
        if result.rows_affected() == 0 {
            let exists = query_scalar::<_, i64>(
                r#"SELECT COUNT(*) FROM patients WHERE id = ?"#,
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(PatientRepositoryError::from)?;

            if exists == 0 {
                return Err(PatientRepositoryError::NotFound);
            }
        }

        self.fetch_row(id).await
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<PatientRow>, PatientRepositoryError> {
        let row = query_as::<_, PatientRow>(
            r#"
            SELECT id, name, birth_date, is_sick, score FROM patients WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<PatientRow>, PatientRepositoryError> {
        let rows = query_as::<_, PatientRow>(
            r#"
            SELECT id, name, birth_date, is_sick, score FROM patients
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        Ok(rows)
    }

    async fn search_by_name(
        &self,
        keyword: &str,
        pagination: PaginationParams,
    ) -> Result<(Vec<PatientRow>, u64), PatientRepositoryError> {
        // LIKE under the default utf8mb4 collation, so the substring match is
        // case-insensitive. Ordered by id so pages are stable.
        let offset = u64::from(pagination.page) * u64::from(pagination.page_size);

        let rows = query_as::<_, PatientRow>(
            r#"
            SELECT id, name, birth_date, is_sick, score
            FROM patients
            WHERE name LIKE CONCAT('%', ?, '%')
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(keyword)
        .bind(u64::from(pagination.page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        let total = query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM patients WHERE name LIKE CONCAT('%', ?, '%')
            "#,
        )
        .bind(keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        Ok((rows, total.max(0) as u64))
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), PatientRepositoryError> {
        let result = query(
            r#"
            DELETE FROM patients WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(PatientRepositoryError::from)?;

        // Deleting an absent id is reported, not swallowed.
        if result.rows_affected() == 0 {
            return Err(PatientRepositoryError::NotFound);
        }

        Ok(())
    }
}
