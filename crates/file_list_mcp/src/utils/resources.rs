/// Server status resource
pub const STATUS_RESOURCE: &str = "file-list://status";

/// Usage documentation resource
pub const HELP_RESOURCE: &str = "file-list://help";

/// Available resource URIs for the File List MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &[STATUS_RESOURCE, HELP_RESOURCE];
