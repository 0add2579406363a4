pub mod app_config;
pub mod config;
pub mod error;
pub mod fetch_config;
pub mod types;

pub use app_config::{AppConfig, DEFAULT_BASE_URL};
pub use config::{load_app_config_from_env, parse_base_url};
pub use error::ConfigError;
pub use fetch_config::OrchestratorConfig;
pub use types::{BrochureRecord, FetchResult, FetchTarget, ValidityWindow, PARSED_TIME_FORMAT};
