use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::{
    domain::{ScanOptions, TreeScanner},
    errors::{FileListError, FileListResult},
    models::TreeNode,
};

/// A qualifying entry read from one directory
#[derive(Debug)]
struct DirectoryEntry {
    name: String,
    path: PathBuf,
    kind: EntryKind,
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    Directory,
    File { size: u64 },
}

impl EntryKind {
    fn is_file(self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Filesystem-backed tree scanner
///
/// Walks real directories with `std::fs`. Each call re-reads the filesystem
/// and holds a directory handle only while that directory is being listed.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTreeScanner;

impl DirectoryTreeScanner {
    /// Create a new DirectoryTreeScanner instance
    pub fn new() -> Self {
        Self
    }

    /// Name shown for the scan root
    ///
    /// Falls back to the canonical path for inputs without a final component
    /// (`.`, `..`, `/`) and finally to the input itself.
    fn root_name(path: &Path, directory_path: &str) -> String {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().into_owned();
        }

        fs::canonicalize(path)
            .ok()
            .and_then(|real| real.file_name().map(|name| name.to_string_lossy().into_owned()))
            .unwrap_or_else(|| directory_path.to_string())
    }

    /// Read, filter and sort the immediate entries of `dir`
    ///
    /// Symlinks and special files are dropped, as are entries excluded by
    /// the options. Directories sort before files, then by name.
    fn read_entries(dir: &Path, options: &ScanOptions) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;

            let kind = if file_type.is_dir() {
                if !options.include_directories {
                    continue;
                }
                EntryKind::Directory
            } else if file_type.is_file() {
                if !options.include_files {
                    continue;
                }
                EntryKind::File {
                    size: entry.metadata()?.len(),
                }
            } else {
                continue;
            };

            entries.push(DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                kind,
            });
        }

        entries.sort_by(|a, b| {
            a.kind
                .is_file()
                .cmp(&b.kind.is_file())
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(entries)
    }

    /// Decide what a failed directory listing means for the scan
    ///
    /// Permission errors abort the scan at the root but only truncate nested
    /// directories (`Ok(())`); every other error is internal.
    fn check_read_error(
        error: io::Error,
        depth: usize,
        display_path: &str,
        path: &Path,
    ) -> FileListResult<()> {
        match error.kind() {
            ErrorKind::PermissionDenied if depth == 0 => Err(FileListError::AccessDenied {
                path: display_path.to_string(),
                message: error.to_string(),
            }),
            ErrorKind::PermissionDenied => {
                tracing::debug!(path = %path.display(), "Skipping unreadable directory: {}", error);
                Ok(())
            }
            _ => Err(FileListError::internal(format!(
                "{}: {}",
                path.display(),
                error
            ))),
        }
    }

    fn build_directory(
        name: String,
        display_path: String,
        path: &Path,
        depth: usize,
        max_depth: usize,
        options: &ScanOptions,
    ) -> FileListResult<TreeNode> {
        if depth >= max_depth {
            return Ok(TreeNode::directory(name, display_path, Vec::new()));
        }

        let entries = match Self::read_entries(path, options) {
            Ok(entries) => entries,
            Err(e) => {
                Self::check_read_error(e, depth, &display_path, path)?;
                return Ok(TreeNode::directory(name, display_path, Vec::new()));
            }
        };

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry_path = entry.path.to_string_lossy().into_owned();
            let child = match entry.kind {
                EntryKind::File { size } => TreeNode::file(entry.name, entry_path, size),
                EntryKind::Directory => Self::build_directory(
                    entry.name,
                    entry_path,
                    &entry.path,
                    depth + 1,
                    max_depth,
                    options,
                )?,
            };
            children.push(child);
        }

        Ok(TreeNode::directory(name, display_path, children))
    }
}

impl TreeScanner for DirectoryTreeScanner {
    fn scan(&self, directory_path: &str, options: &ScanOptions) -> FileListResult<TreeNode> {
        let root = Path::new(directory_path);
        if !root.is_dir() {
            return Err(FileListError::invalid_input(format!(
                "Directory does not exist: {}",
                directory_path
            )));
        }

        let max_depth = usize::try_from(options.max_depth)
            .map_err(|_| FileListError::invalid_input("Max depth must be non-negative"))?;

        tracing::debug!(
            path = directory_path,
            max_depth,
            include_files = options.include_files,
            include_directories = options.include_directories,
            "Scanning directory tree"
        );

        // Descendant paths are reported absolute, the root as given
        let absolute_root = std::path::absolute(root)
            .map_err(|e| FileListError::internal(format!("{}: {}", directory_path, e)))?;

        let tree = Self::build_directory(
            Self::root_name(root, directory_path),
            directory_path.to_string(),
            &absolute_root,
            0,
            max_depth,
            options,
        )?;

        tracing::debug!(
            name = tree.name(),
            path = tree.path(),
            depth = tree.depth(),
            files = tree.file_count(),
            total_size = tree.total_size(),
            "Scan finished"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// root/a.txt (10 bytes), root/sub/b.txt (5 bytes)
    fn create_sample_tree() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("a.txt"), "0123456789").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub").join("b.txt"), "01234").unwrap();
        temp_dir
    }

    fn options(max_depth: i64, include_files: bool, include_directories: bool) -> ScanOptions {
        ScanOptions {
            max_depth,
            include_files,
            include_directories,
        }
    }

    fn scan(path: &Path, options: ScanOptions) -> FileListResult<TreeNode> {
        DirectoryTreeScanner::new().scan(&path.display().to_string(), &options)
    }

    fn children(node: &TreeNode) -> &[TreeNode] {
        node.children().expect("Expected a directory node")
    }

    fn count_files(node: &TreeNode) -> usize {
        match node.children() {
            None => 1,
            Some(children) => children.iter().map(count_files).sum(),
        }
    }

    #[test]
    fn test_sample_tree_depth_two() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(2, true, true)).unwrap();

        assert!(root.is_directory());
        assert_eq!(root.path(), temp_dir.path().display().to_string());
        let root_children = children(&root);
        assert_eq!(root_children.len(), 2);

        let sub = &root_children[0];
        assert_eq!(sub.name(), "sub");
        assert!(sub.is_directory());
        assert_eq!(children(sub).len(), 1);
        assert_eq!(children(sub)[0].name(), "b.txt");
        assert_eq!(children(sub)[0].size(), Some(5));

        let a = &root_children[1];
        assert_eq!(a.name(), "a.txt");
        assert_eq!(a.size(), Some(10));
        assert!(a.children().is_none());
    }

    #[test]
    fn test_sample_tree_depth_one_truncates_sub() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(1, true, true)).unwrap();

        let root_children = children(&root);
        assert_eq!(root_children.len(), 2);
        assert_eq!(root_children[0].name(), "sub");
        assert_eq!(children(&root_children[0]).len(), 0);
        assert_eq!(root_children[1].size(), Some(10));
    }

    #[test]
    fn test_depth_zero_returns_empty_root() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(0, true, true)).unwrap();

        assert!(root.is_directory());
        assert!(children(&root).is_empty());
    }

    #[test]
    fn test_tree_depth_is_bounded_by_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let deep = temp_dir.path().join("l1").join("l2").join("l3").join("l4");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("leaf.txt"), "x").unwrap();

        for max_depth in 0..=7 {
            let root = scan(temp_dir.path(), options(max_depth, true, true)).unwrap();
            // four directory levels plus the leaf file
            assert_eq!(root.depth() as i64, max_depth.min(5));
        }
    }

    #[test]
    fn test_directories_before_files_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        for file in ["zeta.txt", "Alpha.txt", "beta.txt"] {
            fs::write(temp_dir.path().join(file), "x").unwrap();
        }
        for dir in ["zdir", "Bdir", "adir"] {
            fs::create_dir(temp_dir.path().join(dir)).unwrap();
        }

        let root = scan(temp_dir.path(), options(1, true, true)).unwrap();

        let names: Vec<&str> = children(&root).iter().map(TreeNode::name).collect();
        assert_eq!(
            names,
            vec!["Bdir", "adir", "zdir", "Alpha.txt", "beta.txt", "zeta.txt"]
        );
    }

    #[test]
    fn test_exclude_files() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(5, false, true)).unwrap();

        // Only directory nodes remain: root and sub
        assert_eq!(count_files(&root), 0);
        assert_eq!(children(&root).len(), 1);
        assert!(children(&children(&root)[0]).is_empty());
    }

    #[test]
    fn test_exclude_directories() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(5, true, false)).unwrap();

        let root_children = children(&root);
        assert_eq!(root_children.len(), 1);
        assert_eq!(root_children[0].name(), "a.txt");
        assert!(root_children.iter().all(|child| !child.is_directory()));
    }

    #[test]
    fn test_exclude_everything() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(5, false, false)).unwrap();

        assert!(children(&root).is_empty());
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let temp_dir = create_sample_tree();

        let first = scan(temp_dir.path(), options(3, true, true)).unwrap();
        let second = scan(temp_dir.path(), options(3, true, true)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_child_paths_are_absolute() {
        let temp_dir = create_sample_tree();

        let root = scan(temp_dir.path(), options(2, true, true)).unwrap();

        let sub = &children(&root)[0];
        assert_eq!(
            sub.path(),
            temp_dir.path().join("sub").display().to_string()
        );
        assert!(Path::new(children(sub)[0].path()).is_absolute());
    }

    #[test]
    fn test_root_name_uses_final_component() {
        let temp_dir = create_sample_tree();
        let sub = temp_dir.path().join("sub");

        let root = scan(&sub, options(1, true, true)).unwrap();

        assert_eq!(root.name(), "sub");
    }

    #[test]
    fn test_root_name_for_dot_path() {
        let root = DirectoryTreeScanner::new()
            .scan(".", &options(0, true, true))
            .unwrap();

        assert!(!root.name().is_empty());
        assert_ne!(root.name(), ".");
        assert_eq!(root.path(), ".");
    }

    #[test]
    fn test_nonexistent_directory_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = scan(&missing, options(3, true, true));

        match result {
            Err(FileListError::InvalidInput { message }) => {
                assert!(message.starts_with("Directory does not exist"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_file_path_is_invalid_input() {
        let temp_dir = create_sample_tree();

        let result = scan(&temp_dir.path().join("a.txt"), options(3, true, true));

        assert!(matches!(result, Err(FileListError::InvalidInput { .. })));
    }

    #[test]
    fn test_negative_depth_is_invalid_input() {
        let temp_dir = create_sample_tree();

        let result = scan(temp_dir.path(), options(-1, true, true));

        match result {
            Err(FileListError::InvalidInput { message }) => {
                assert_eq!(message, "Max depth must be non-negative");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_checked_before_depth() {
        let temp_dir = TempDir::new().unwrap();

        let result = scan(&temp_dir.path().join("missing"), options(-1, true, true));

        match result {
            Err(FileListError::InvalidInput { message }) => {
                assert!(message.starts_with("Directory does not exist"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let temp_dir = create_sample_tree();
        std::os::unix::fs::symlink(
            temp_dir.path().join("a.txt"),
            temp_dir.path().join("link.txt"),
        )
        .unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("sub"), temp_dir.path().join("link_dir"))
            .unwrap();

        let root = scan(temp_dir.path(), options(2, true, true)).unwrap();

        let names: Vec<&str> = children(&root).iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["sub", "a.txt"]);
    }

    /// Remove all permissions from `path`; false when the process can still
    /// list it (e.g. running as root), in which case the test is skipped
    #[cfg(unix)]
    fn lock_directory(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        fs::read_dir(path).is_err()
    }

    #[cfg(unix)]
    fn unlock_directory(path: &Path) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_nested_directory_is_truncated() {
        let temp_dir = create_sample_tree();
        let sub = temp_dir.path().join("sub");
        if !lock_directory(&sub) {
            unlock_directory(&sub);
            return;
        }

        let result = scan(temp_dir.path(), options(3, true, true));
        unlock_directory(&sub);

        let root = result.unwrap();
        let root_children = children(&root);
        assert_eq!(root_children.len(), 2);
        assert_eq!(root_children[0].name(), "sub");
        assert!(children(&root_children[0]).is_empty());
        assert_eq!(root_children[1].name(), "a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_access_denied() {
        let temp_dir = create_sample_tree();
        let sub = temp_dir.path().join("sub");
        if !lock_directory(&sub) {
            unlock_directory(&sub);
            return;
        }

        let result = scan(&sub, options(3, true, true));
        let depth_zero = scan(&sub, options(0, true, true));
        unlock_directory(&sub);

        match result {
            Err(FileListError::AccessDenied { path, .. }) => {
                assert_eq!(path, sub.display().to_string());
            }
            other => panic!("Expected AccessDenied, got {:?}", other),
        }
        // Depth 0 never enumerates, so it never hits the permission check
        assert!(depth_zero.is_ok());
    }

    #[test]
    fn test_permission_error_at_root_is_access_denied() {
        let error = io::Error::from(ErrorKind::PermissionDenied);

        let result =
            DirectoryTreeScanner::check_read_error(error, 0, "data", Path::new("/srv/data"));

        match result {
            Err(FileListError::AccessDenied { path, .. }) => assert_eq!(path, "data"),
            other => panic!("Expected AccessDenied, got {:?}", other),
        }
    }

    #[test]
    fn test_permission_error_below_root_truncates() {
        for depth in [1, 2, 5] {
            let error = io::Error::from(ErrorKind::PermissionDenied);

            let result = DirectoryTreeScanner::check_read_error(
                error,
                depth,
                "/srv/data/private",
                Path::new("/srv/data/private"),
            );

            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_other_read_errors_are_internal() {
        for depth in [0, 3] {
            let error = io::Error::other("input/output error");

            let result = DirectoryTreeScanner::check_read_error(
                error,
                depth,
                "/srv/data",
                Path::new("/srv/data"),
            );

            match result {
                Err(FileListError::Internal { message }) => {
                    assert!(message.contains("/srv/data"));
                    assert!(message.contains("input/output error"));
                }
                other => panic!("Expected Internal, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_not_found_during_listing_is_internal() {
        let error = io::Error::from(ErrorKind::NotFound);

        let result =
            DirectoryTreeScanner::check_read_error(error, 1, "/gone", Path::new("/gone"));

        assert!(matches!(result, Err(FileListError::Internal { .. })));
    }
}
