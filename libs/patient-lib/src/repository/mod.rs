pub mod patient_repository;
pub mod models;
pub mod errors;
pub mod traits;

pub use patient_repository::PatientRepository;
pub use errors::PatientRepositoryError;
