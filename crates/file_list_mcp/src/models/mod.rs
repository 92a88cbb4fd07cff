pub mod requests;
pub mod tree;

pub use requests::GetFileListRequest;
pub use tree::TreeNode;
