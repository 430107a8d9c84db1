//! Payroll engine HTTP service.
//!
//! Reads its configuration from `PAYROLL_CONFIG_DIR` (default `./config`)
//! and serves the payroll API on the configured address.

use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config".into());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        accounts = config.seed().accounts.len(),
        salaries = config.seed().salaries.len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(&config.settings().server_addr).await?;
    info!(addr = %listener.local_addr()?, "Payroll engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
