use std::path::{Path, PathBuf};

use anyhow::Result;

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("TOPLIST_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("toplist");
        Ok(Self { config_dir })
    }

    pub fn from_docker_env() -> Self {
        Self {
            config_dir: container_base_path(),
        }
    }

    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Single-slot token file, plain text, overwritten wholesale.
    pub fn token_file(&self) -> PathBuf {
        self.config_dir.join("trakt_token.txt")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Presence of the container base directory indicates Docker; it is
        // created in the Containerfile.
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        // Otherwise use platform-specific paths (e.g. ~/.config/toplist on Linux)
        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}
