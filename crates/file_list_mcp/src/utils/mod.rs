pub mod logging;
pub mod resources;
