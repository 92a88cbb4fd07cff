/// Default depth used when a caller omits `maxDepth`
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub default_max_depth: u32,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            log_level: None,
        }
    }
}
