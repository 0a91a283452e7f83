use anyhow::Context;
use resilience_gateway::{shared::LoggingUtils, AppConfig, HttpServer};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before logging so the configured level applies
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = LoggingUtils::initialize(&config.logging.level, &config.logging.format) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting resilience gateway...");

    if let Err(e) = serve(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let server = HttpServer::new(config)
        .await
        .context("Failed to initialize server")?;

    info!(
        address = %server.config().server_address(),
        mode = %server.state().controller.mode(),
        "Server initialized"
    );

    server.run().await.context("Server error")?;
    Ok(())
}
