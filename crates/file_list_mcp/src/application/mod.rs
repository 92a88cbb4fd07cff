pub mod directory_tree_scanner;

pub use directory_tree_scanner::DirectoryTreeScanner;
