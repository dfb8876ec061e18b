use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_port() -> u16 {
    3000
}
fn default_max_connections() -> u32 {
    10
}
fn default_token_ttl_hours() -> i64 {
    12
}
fn default_run_migrations() -> bool {
    true
}
fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl ServerConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("database_url", "sqlite://helpdesk.db?mode=rwc")?
            .set_default("port", i64::from(default_port()))?
            .set_default("jwt_secret", "change-me")?
            // Shared settings, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. HELPDESK__PORT=8080)
            .add_source(
                Environment::with_prefix("HELPDESK")
                    .separator("__")
                    .try_parsing(true),
            );

        // Plain DATABASE_URL wins over everything, matching the usual .env layout
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database_url", url)?;
        }

        builder.build()?.try_deserialize()
    }
}
