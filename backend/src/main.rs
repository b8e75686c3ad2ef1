use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use family_ledger_backend::config::AppConfig;
use family_ledger_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter)
                .with_context(|| format!("invalid log filter: {}", config.log_filter))?,
        )
        .init();

    if config.uses_dev_secret() {
        warn!("Signing tokens with the development secret; set FAMILY_LEDGER_TOKEN_SECRET");
    }

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Family ledger listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
