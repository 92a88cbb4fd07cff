use clap::Parser;

use crate::config::{Config, DEFAULT_MAX_DEPTH};

/// File List MCP Server
///
/// A Model Context Protocol server exposing one tool, `get_file_list`, which
/// returns a directory's contents as a JSON tree up to a bounded depth.
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-file-list
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "file-list": {
///       "command": "mcp-server-file-list",
///       "args": ["--default-max-depth", "3"],
///       "env": {
///         "RUST_LOG": "info"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
/// - `LOG_LEVEL`: Fallback log level when `RUST_LOG` is unset
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-file-list")]
#[command(about = "An MCP server that lists directory trees up to a bounded depth")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) server that lists the files and directories under a path as a JSON tree. \nServes over stdio; logs, when enabled, are written to stderr."
)]
pub struct Cli {
    /// Depth used when a `get_file_list` call omits `maxDepth`
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub default_max_depth: u32,

    /// Log level used when `RUST_LOG` is unset (e.g. info, debug, trace)
    #[arg(long, value_name = "LEVEL", env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> Config {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> Config {
        Config {
            default_max_depth: self.default_max_depth,
            log_level: self.log_level,
        }
    }
}
