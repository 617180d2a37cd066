mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, build_sweep_config, validate_file_config};
pub use file::FileConfig;
pub use models::{AppConfig, SystemConfig};
