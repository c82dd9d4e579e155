// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{config_path, load_config, load_config_from_path, API_BASE_URL_ENV, USER_ID_ENV};
pub use settings::ClientConfig;
