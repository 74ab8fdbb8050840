use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::DEFAULT_SLOT_KEY;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PhonebookConfig {
    pub server: Option<ServerConfig>,
    pub storage: Option<StorageConfig>,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig::default()),
            storage: Some(StorageConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory for the JSON slot or the SQLite file. Defaults to the
    /// platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default = "default_slot_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: None,
            key: default_slot_key(),
        }
    }
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

impl PhonebookConfig {
    /// Loads the config from the platform config directory, writing a
    /// default file there first if none exists.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            let default_config = toml::to_string_pretty(&PhonebookConfig::default())
                .map_err(|e| ConfigError::Message(format!("Failed to render default config: {e}")))?;
            std::fs::write(config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
            tracing::info!("Wrote default config to {:?}", config_path);
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn storage(&self) -> StorageConfig {
        self.storage.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("phonebook").join("phonebook.toml")
    } else {
        PathBuf::from("phonebook.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("phonebook.toml");

        let config = PhonebookConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, PhonebookConfig::default());
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.storage().key, "contacts");
    }

    #[test]
    fn test_partial_storage_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.toml");
        std::fs::write(
            &path,
            r#"
[storage]
backend = "sqlite"
path = "/tmp/phonebook-data"
"#,
        )
        .unwrap();

        let config = PhonebookConfig::load_from(&path).unwrap();
        let storage = config.storage();

        assert_eq!(storage.backend, StorageBackend::Sqlite);
        assert_eq!(storage.path.as_deref(), Some("/tmp/phonebook-data"));
        assert_eq!(storage.key, "contacts");
        assert_eq!(config.server, None);
        assert_eq!(config.server(), ServerConfig::default());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.toml");
        std::fs::write(&path, "[storage]\nbackend = \"redis\"\n").unwrap();

        assert!(PhonebookConfig::load_from(&path).is_err());
    }
}
