pub mod tree_scanner;

pub use tree_scanner::{ScanOptions, TreeScanner};
