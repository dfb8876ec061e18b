use infrastructure::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env
    dotenv::dotenv().ok();

    let config_dir = std::env::args().nth(1).unwrap_or_else(|| "config".into());
    let config = ServerConfig::load(&config_dir)?;

    println!("Connecting to database...");
    let connection = infrastructure::connect(&config.database_url, 1).await?;

    infrastructure::migrate(&connection).await?;
    println!("✅ Migrations applied successfully.");

    Ok(())
}
