pub mod api;
pub mod auth;
pub mod error;
pub mod state;

use auth::TokenService;
use infrastructure::{PasswordHasher, ServerConfig};
use state::AppState;
use std::sync::Arc;
use tracing::info;

pub use api::create_router;

/// Connects to the database, applies migrations when enabled and wires the
/// services.
pub async fn setup_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    info!("Connecting to database...");
    let db = infrastructure::connect(&config.database_url, config.max_connections).await?;

    if config.run_migrations {
        infrastructure::migrate(&db).await?;
    }

    Ok(Arc::new(AppState::new(
        db,
        TokenService::new(&config.jwt_secret, config.token_ttl_hours),
        PasswordHasher::new(config.bcrypt_cost),
    )))
}
