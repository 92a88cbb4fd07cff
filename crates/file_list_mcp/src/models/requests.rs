use derive_getters::Getters;
use rmcp::schemars;
use serde::Deserialize;

use crate::{
    errors::{FileListError, FileListResult},
    service::validation::Validate,
};

fn default_true() -> bool {
    true
}

/// Request to list a directory as a tree
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GetFileListRequest {
    /// The directory path to scan.
    directory_path: String,
    /// Maximum depth to scan recursively; 0 returns only the root. Defaults to the server's configured depth.
    #[serde(default)]
    max_depth: Option<i64>,
    /// Include files in the result. Default is true.
    #[serde(default = "default_true")]
    include_files: bool,
    /// Include directories in the result. Default is true.
    #[serde(default = "default_true")]
    include_directories: bool,
}

#[cfg(test)]
impl GetFileListRequest {
    pub fn new(directory_path: impl Into<String>) -> Self {
        Self {
            directory_path: directory_path.into(),
            max_depth: None,
            include_files: true,
            include_directories: true,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_include_files(mut self, include_files: bool) -> Self {
        self.include_files = include_files;
        self
    }

    pub fn with_include_directories(mut self, include_directories: bool) -> Self {
        self.include_directories = include_directories;
        self
    }
}

impl Validate for GetFileListRequest {
    fn validate(&self) -> FileListResult<()> {
        if self.directory_path.trim().is_empty() {
            return Err(FileListError::invalid_input(
                "Directory path must not be empty",
            ));
        }

        Ok(())
    }
}
