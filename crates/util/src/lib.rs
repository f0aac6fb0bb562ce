pub mod config_store;
pub mod path_processing;

pub use config_store::{CONFIG_PATH_ENV, ConfigLoadError, LoadedConfig, load_config, resolve_config_path, save_config};
pub use path_processing::{default_log_path, expand_tilde};
