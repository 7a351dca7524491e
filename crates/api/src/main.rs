//! Car Price Estimator - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("CARPRICE_CONFIG").ok();
    let settings = Settings::load(config_path.as_deref())?;
    init_logging(&settings.logging)?;

    info!("=== Car Price Estimator v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Model: {}, schema: {}",
        settings.artifacts.model_path, settings.artifacts.schema_path
    );

    run_server(settings).await?;

    Ok(())
}
