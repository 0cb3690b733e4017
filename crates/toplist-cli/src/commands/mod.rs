pub mod auth;
pub mod config;
pub mod sync;

use color_eyre::Result;
use toplist_config::{Config, PathManager, TokenStore};

/// Load the config and token store from the default paths.
pub fn load_environment() -> Result<(Config, TokenStore)> {
    let paths = PathManager::default();
    let config = Config::load(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let store = TokenStore::new(paths.token_file());
    Ok((config, store))
}
