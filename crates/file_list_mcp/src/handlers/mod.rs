pub mod file_list_tools;

pub use file_list_tools::FileListService;

use crate::config::Config;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    tracing::info!(
        "Starting File List MCP server (default max depth {})",
        config.default_max_depth
    );

    let service = FileListService::new(config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
