//! Catalog Desk - category and book management console

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_desk::{
    config::AppConfig,
    console::Console,
    notify::ConsoleNotifier,
    services::Services,
};

#[derive(Debug, Parser)]
#[command(name = "catalog-desk", author, version, about, long_about = None)]
struct Cli {
    /// Backend URL, overrides the configured one
    #[arg(long)]
    api_url: Option<String>,

    /// Screen to open first: /categories or /books
    #[arg(long)]
    route: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    // Initialize tracing on stderr, stdout belongs to the console
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catalog_desk={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting Catalog Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.api.base_url);

    let services = Services::new(&config.api)?;
    let start = cli.route.unwrap_or_else(|| config.ui.start_route.clone());

    let mut console = Console::new(
        services,
        Arc::new(ConsoleNotifier),
        std::io::stdin().lock(),
        std::io::stdout(),
    );
    console.run(&start).await?;

    Ok(())
}
