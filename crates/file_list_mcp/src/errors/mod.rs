use rmcp::serde_json::json;

pub type McpError = rmcp::ErrorData;

/// Result type for scanner and CLI operations
pub type FileListResult<T> = Result<T, FileListError>;

/// Type alias for MCP results
pub type McpResult<T> = Result<T, McpError>;

/// Type alias for tool results
pub type ToolResult = McpResult<rmcp::model::CallToolResult>;

// Error kinds reported in the `data` payload of MCP errors
const ERROR_INVALID_INPUT: &str = "invalid_input";
const ERROR_ACCESS_DENIED: &str = "access_denied";
const ERROR_INTERNAL: &str = "internal";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Errors raised while listing a directory tree
#[derive(thiserror::Error, Debug)]
pub enum FileListError {
    /// Malformed caller arguments (missing directory, negative depth, ...)
    #[error("{message}")]
    InvalidInput { message: String },
    /// The scan root itself cannot be read
    #[error("Access denied to path: {path}. {message}")]
    AccessDenied { path: String, message: String },
    /// Any other failure while walking the tree
    #[error("Error scanning directory: {message}")]
    Internal { message: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl FileListError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<FileListError> for McpError {
    fn from(err: FileListError) -> Self {
        let message = err.to_string();
        match err {
            FileListError::InvalidInput { .. } => {
                McpError::invalid_params(message, Some(json!({"kind": ERROR_INVALID_INPUT})))
            }
            FileListError::AccessDenied { path, .. } => McpError::invalid_params(
                message,
                Some(json!({"kind": ERROR_ACCESS_DENIED, "path": path})),
            ),
            FileListError::Internal { .. } | FileListError::LoggingInitialization(_) => {
                McpError::internal_error(message, Some(json!({"kind": ERROR_INTERNAL})))
            }
            FileListError::ResourceNotFound { uri } => McpError::resource_not_found(
                message,
                Some(json!({
                    "kind": ERROR_RESOURCE_NOT_FOUND,
                    "uri": uri,
                    "available_resources": crate::utils::resources::AVAILABLE_RESOURCES
                })),
            ),
        }
    }
}
