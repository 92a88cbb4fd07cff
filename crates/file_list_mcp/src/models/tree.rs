use serde::{Deserialize, Serialize};

/// One filesystem entry in a directory listing tree
///
/// Serialized with a `"type"` tag of `"file"` or `"directory"`. Files carry a
/// `size` and never `children`; directories always carry `children`, possibly
/// empty, and never a `size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum TreeNode {
    File {
        /// Base name of the file
        name: String,
        /// Path identifying the file
        path: String,
        /// Length of the file in bytes
        size: u64,
    },
    Directory {
        /// Base name of the directory
        name: String,
        /// Path identifying the directory
        path: String,
        /// Directories first, then files, each group sorted by name
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
            size,
        }
    }

    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self::Directory {
            name: name.into(),
            path: path.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Children of a directory node, `None` for files
    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            Self::File { .. } => None,
            Self::Directory { children, .. } => Some(children.as_slice()),
        }
    }

    /// Size of a file node, `None` for directories
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::File { size, .. } => Some(*size),
            Self::Directory { .. } => None,
        }
    }

    /// Number of levels below this node, 0 for a file or an empty directory
    pub fn depth(&self) -> usize {
        self.children()
            .and_then(|children| children.iter().map(|child| child.depth() + 1).max())
            .unwrap_or(0)
    }

    /// Number of file nodes in this subtree
    pub fn file_count(&self) -> usize {
        if !self.is_directory() {
            return 1;
        }
        self.children()
            .map(|children| children.iter().map(TreeNode::file_count).sum())
            .unwrap_or(0)
    }

    /// Sum of all file sizes in this subtree
    pub fn total_size(&self) -> u64 {
        match self.children() {
            None => self.size().unwrap_or(0),
            Some(children) => children.iter().map(TreeNode::total_size).sum(),
        }
    }

    /// Render the tree as indented JSON
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
