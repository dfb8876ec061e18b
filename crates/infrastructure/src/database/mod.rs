mod machine_repository;
mod report_case_repository;
mod report_repository;
mod specialization_repository;
mod user_repository;
mod worker_repository;

pub mod entities;

pub use machine_repository::SeaOrmMachineRepository;
pub use report_case_repository::SeaOrmReportCaseRepository;
pub use report_repository::SeaOrmReportRepository;
pub use specialization_repository::SeaOrmSpecializationRepository;
pub use user_repository::SeaOrmUserRepository;
pub use worker_repository::SeaOrmWorkerRepository;

use domain::DomainError;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::info;

/// Opens the connection pool.
///
/// Every pooled connection to `sqlite::memory:` would be its own empty
/// database, so in-memory SQLite is pinned to a single connection.
pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let max = if url.starts_with("sqlite::memory:") {
        1
    } else {
        max_connections.max(1)
    };

    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(max)
        .min_connections(1)
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Applies pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running database migrations...");
    Migrator::up(db, None).await?;
    info!("✅ Migrations applied successfully");
    Ok(())
}

/// Maps a store error onto the domain. Unique violations become `Conflict`,
/// foreign-key violations `Validation`; anything else is an opaque `Database`
/// error carrying the driver message.
pub(crate) fn db_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::Validation(format!("Referenced row does not exist or is in use: {}", msg))
        }
        _ => DomainError::Database(e.to_string()),
    }
}
