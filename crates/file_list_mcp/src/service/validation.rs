use crate::errors::FileListResult;

/// Checks a tool request before it touches the filesystem
pub trait Validate {
    fn validate(&self) -> FileListResult<()>;
}
