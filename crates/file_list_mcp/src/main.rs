mod application;
mod cli;
mod config;
mod domain;
mod errors;
mod handlers;
mod models;
mod service;
mod utils;

use cli::Cli;
use handlers::run;
use utils::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config();

    // Logs go to stderr; stdout is the MCP transport
    logging::init_logging(config.log_level.as_deref())?;

    if let Err(e) = run(config).await {
        tracing::error!("Failed to run File List MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
