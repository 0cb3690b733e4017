pub mod config;
pub mod paths;
pub mod token;

pub use config::{Config, ConfigError, SourceConfig, TraktConfig};
pub use paths::{container_base_path, PathManager};
pub use token::TokenStore;
