pub mod entities;
pub mod repository;
pub mod util;
pub mod patient_service;
pub mod errors_service;

pub use entities::*;
pub use patient_service::*;
pub use errors_service::*;
