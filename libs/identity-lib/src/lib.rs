pub mod entities;
pub mod repository;
pub mod util;
pub mod password;
pub mod policy;
pub mod account_service;
pub mod errors_service;
pub mod bootstrap;

pub use entities::*;
pub use account_service::*;
pub use errors_service::*;
pub use bootstrap::*;
