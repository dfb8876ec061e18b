//! Infrastructure layer - persistence, configuration and password hashing

pub mod config;
pub mod database;
pub mod security;

pub use config::ServerConfig;
pub use database::{
    SeaOrmMachineRepository, SeaOrmReportCaseRepository, SeaOrmReportRepository,
    SeaOrmSpecializationRepository, SeaOrmUserRepository, SeaOrmWorkerRepository, connect,
    migrate,
};
pub use security::PasswordHasher;
