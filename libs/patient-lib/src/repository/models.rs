use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PatientRow {
    pub id: u64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub is_sick: bool,
    pub score: i32,
}
