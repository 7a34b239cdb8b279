use dotenvy::dotenv;
use pizzeria::{
    config::{database, settings},
    errors::Result,
    web::{self, AppState, views::Views},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = settings::load_app_configuration()?;

    // 4. Connect and make sure every table exists
    if let Some(dir) = settings::sqlite_parent_dir(&app_config.database_url) {
        std::fs::create_dir_all(dir)?;
    }
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve
    let views = Views::new()?;
    let app = web::build_router(AppState::new(Arc::new(db), views));
    let listener = tokio::net::TcpListener::bind(app_config.listen_addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", app_config.listen_addr, e))?;
    info!("Listening on http://{}", app_config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
