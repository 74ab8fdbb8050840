use std::path::PathBuf;

use crate::config::{StorageBackend, StorageConfig};
use crate::storage::{ContactStorage, JsonFileStorage, MemoryStorage, SqliteStorage};

/// Returns the directory holding persisted phonebook data
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/phonebook`
/// - **Linux**: `~/.local/share/phonebook`
/// - **Windows**: `%LOCALAPPDATA%\phonebook`
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("phonebook"))
}

/// The slot key becomes a file name for the JSON backend, so it must stay a
/// single path component.
pub fn validate_slot_key(key: &str) -> anyhow::Result<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(anyhow::anyhow!("Invalid storage key {:?}", key));
    }
    Ok(())
}

/// Builds the configured storage backend
pub fn open_storage(config: &StorageConfig) -> anyhow::Result<Box<dyn ContactStorage>> {
    validate_slot_key(&config.key)?;

    let data_dir = match &config.path {
        Some(path) => PathBuf::from(path),
        None => get_data_dir()?,
    };

    let storage: Box<dyn ContactStorage> = match config.backend {
        StorageBackend::Json => {
            let storage = JsonFileStorage::new(&data_dir, &config.key);
            tracing::info!("Using JSON contact slot at {:?}", storage.path());
            Box::new(storage)
        }
        StorageBackend::Sqlite => {
            let db_path = data_dir.join("phonebook.sqlite3");
            tracing::info!("Using SQLite contact slot '{}' in {:?}", config.key, db_path);
            Box::new(SqliteStorage::open(&db_path, &config.key)?)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory contact slot, nothing will be saved");
            Box::new(MemoryStorage::new())
        }
    };

    Ok(storage)
}
