mod app;
mod config;
mod filter;
mod infrastructure;
mod telegram;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let logs_dir = directories::ensure_logs_dir(&config.directories)?;
    logging::init_tracing(&config.logging, &logs_dir)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::AntiSpamApp::initialize(config, shutdown.clone());
    app.run().await
}
