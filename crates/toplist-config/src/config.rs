use std::path::Path;

use serde::{Deserialize, Serialize};
use toplist_models::StreamingService;

const FLIXPATROL_TOP10_BASE: &str = "https://flixpatrol.com/top10/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Missing required setting `{field}` (set it in {path} or via the {env} environment variable)")]
    MissingField {
        field: &'static str,
        env: &'static str,
        path: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub trakt: TraktConfig,
    /// Services to process, in order. Defaults to the full fixed list.
    #[serde(default = "default_services")]
    pub services: Vec<StreamingService>,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraktConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_base_url")]
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_base_url(),
        }
    }
}

fn default_services() -> Vec<StreamingService> {
    StreamingService::ALL.to_vec()
}

fn default_source_base_url() -> String {
    FLIXPATROL_TOP10_BASE.to_string()
}

impl Config {
    /// Load the config file, apply environment overrides for credentials,
    /// and fail fast if any required credential is still missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display_path = path.display().to_string();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: display_path.clone(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: display_path.clone(),
                source,
            })?
        } else {
            // Allow a pure-environment setup with no file on disk.
            Config {
                trakt: TraktConfig::default(),
                services: default_services(),
                source: SourceConfig::default(),
            }
        };

        config.apply_env_overrides();
        config.validate(&display_path)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("TOPLIST_CLIENT_ID") {
            self.trakt.client_id = value;
        }
        if let Ok(value) = std::env::var("TOPLIST_CLIENT_SECRET") {
            self.trakt.client_secret = value;
        }
        if let Ok(value) = std::env::var("TOPLIST_USERNAME") {
            self.trakt.username = value;
        }
    }

    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let required = [
            ("trakt.client_id", "TOPLIST_CLIENT_ID", &self.trakt.client_id),
            (
                "trakt.client_secret",
                "TOPLIST_CLIENT_SECRET",
                &self.trakt.client_secret,
            ),
            ("trakt.username", "TOPLIST_USERNAME", &self.trakt.username),
        ];
        for (field, env, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field,
                    env,
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let content = r#"
            services = ["netflix", "apple-tv"]

            [trakt]
            client_id = "id"
            client_secret = "secret"
            username = "user"

            [source]
            base_url = "http://localhost:8080/top10/"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.trakt.username, "user");
        assert_eq!(
            config.services,
            vec![StreamingService::Netflix, StreamingService::AppleTv]
        );
        assert_eq!(config.source.base_url, "http://localhost:8080/top10/");
    }

    #[test]
    fn services_default_to_full_list() {
        let content = r#"
            [trakt]
            client_id = "id"
            client_secret = "secret"
            username = "user"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.services, StreamingService::ALL.to_vec());
        assert_eq!(config.source.base_url, FLIXPATROL_TOP10_BASE);
    }

    #[test]
    fn missing_credentials_are_reported_with_field_name() {
        let config = Config {
            trakt: TraktConfig {
                client_id: "id".to_string(),
                client_secret: String::new(),
                username: "user".to_string(),
            },
            services: default_services(),
            source: SourceConfig::default(),
        };
        let err = config.validate("config.toml").unwrap_err();
        assert!(err.to_string().contains("trakt.client_secret"));
    }
}
