use core::fmt;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::{
    application::DirectoryTreeScanner,
    config::Config,
    domain::{ScanOptions, TreeScanner},
    errors::{FileListError, ToolResult},
    models::GetFileListRequest,
    service::validation::Validate,
    utils::resources::{HELP_RESOURCE, STATUS_RESOURCE},
};

/// File List MCP Service
///
/// Exposes the `get_file_list` tool over MCP. The tree walk is delegated to
/// an injected [`TreeScanner`].
#[derive(Clone)]
pub struct FileListService {
    config: Config,
    scanner: Arc<dyn TreeScanner>,
    tool_router: ToolRouter<FileListService>,
}

impl FileListService {
    /// Create a new FileListService backed by the filesystem scanner
    pub fn new(config: Config) -> Self {
        Self::with_scanner(config, Arc::new(DirectoryTreeScanner::new()))
    }

    /// Create a new FileListService with a custom scanner
    pub fn with_scanner(config: Config, scanner: Arc<dyn TreeScanner>) -> Self {
        Self {
            config,
            scanner,
            tool_router: Self::tool_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    fn generate_status_content(&self) -> String {
        format!(
            r#"File List MCP Server Status

Server: Running
Default Max Depth: {}
Tools Available: 1
Resources Available: 2

Capabilities:
- Recursive directory listing as a JSON tree
- Depth-limited traversal
- File and directory inclusion filters
- Directories listed before files, each sorted by name"#,
            self.config.default_max_depth
        )
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"File List MCP Server Help

TOOLS:
- get_file_list: Get a tree-structured list of files and directories
  - directoryPath: Directory to scan (required)
  - maxDepth: Levels to descend, 0 returns only the root (optional, default {})
  - includeFiles: Include files in the result (optional, default true)
  - includeDirectories: Include subdirectories in the result (optional, default true)
  - Example: {{"directoryPath": "/project", "maxDepth": 2}}

RESOURCES:
- file-list://status: Current server status and configuration
- file-list://help: This help documentation

RESULT FORMAT:
Each node has "name", "type" ("directory" or "file") and "path".
Files add "size" in bytes. Directories add "children", which is empty
when the depth limit is reached or the directory cannot be read.

Example:
```json
{{
  "type": "directory",
  "name": "project",
  "path": "/project",
  "children": [
    {{
      "type": "directory",
      "name": "src",
      "path": "/project/src",
      "children": []
    }},
    {{
      "type": "file",
      "name": "README.md",
      "path": "/project/README.md",
      "size": 1024
    }}
  ]
}}
```

NOTES:
- Symbolic links and special files are not listed
- includeDirectories=false also skips everything below subdirectories
- A missing directory or a negative maxDepth is rejected as invalid input"#,
            self.config.default_max_depth
        )
    }
}

#[tool_router]
impl FileListService {
    #[tool(description = "Get a tree-structured list of files and directories in a given path.")]
    pub(crate) async fn get_file_list(
        &self,
        Parameters(req): Parameters<GetFileListRequest>,
    ) -> ToolResult {
        req.validate()?;

        let options = ScanOptions {
            max_depth: req
                .max_depth()
                .unwrap_or_else(|| i64::from(self.config.default_max_depth)),
            include_files: *req.include_files(),
            include_directories: *req.include_directories(),
        };

        let scanner = Arc::clone(&self.scanner);
        let directory_path = req.directory_path().clone();
        let tree = tokio::task::spawn_blocking(move || scanner.scan(&directory_path, &options))
            .await
            .map_err(|e| FileListError::internal(e.to_string()))?
            .inspect_err(|e| {
                tracing::warn!("get_file_list failed for {}: {}", req.directory_path(), e);
            })?;

        let json = tree
            .to_pretty_json()
            .map_err(|e| FileListError::internal(e.to_string()))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for FileListService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "File List MCP Server. Tool: get_file_list returns a directory tree as JSON (default maxDepth {}). Resources: file-list://status, file-list://help.",
                self.config.default_max_depth
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text(STATUS_RESOURCE, "server-status"),
                self.create_resource_text(HELP_RESOURCE, "help-documentation"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            STATUS_RESOURCE => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(self.generate_status_content(), uri)],
            }),
            HELP_RESOURCE => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(self.generate_help_content(), uri)],
            }),
            _ => Err(FileListError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        tracing::info!("File List MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

impl fmt::Debug for FileListService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileListService")
            .field("config", &self.config)
            .finish()
    }
}
