use crate::{errors::FileListResult, models::TreeNode};

/// Options controlling a directory tree scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Levels below the root to enumerate; 0 lists nothing
    pub max_depth: i64,
    /// Whether file entries appear in the result
    pub include_files: bool,
    /// Whether directory entries other than the root appear in the result
    pub include_directories: bool,
}

/// Domain trait for building directory trees
///
/// Abstracts the filesystem walk so the MCP service can be handed any
/// implementation, which keeps the tool handler testable.
pub trait TreeScanner: Send + Sync {
    /// Build the tree rooted at `directory_path`
    ///
    /// # Arguments
    /// * `directory_path` - Existing directory to scan
    /// * `options` - Depth limit and inclusion filters
    ///
    /// # Returns
    /// * `Ok(TreeNode)` - A directory node for the root
    /// * `Err(FileListError::InvalidInput)` - Missing directory or negative depth
    /// * `Err(FileListError::AccessDenied)` - The root cannot be read
    /// * `Err(FileListError::Internal)` - Any other I/O failure
    fn scan(&self, directory_path: &str, options: &ScanOptions) -> FileListResult<TreeNode>;
}
