use super::{decode_snapshot, encode_snapshot, ContactStorage};
use anyhow::{Context, Result};
use shared_types::Contact;
use std::path::{Path, PathBuf};

/// Stores the slot as `<dir>/<key>.json`.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read contacts from {:?}", self.path))?;
        decode_snapshot(&raw)
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Write next to the slot and rename so a crash never leaves half a file
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, encode_snapshot(contacts)?)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;

        tracing::debug!("Saved {} contacts to {:?}", contacts.len(), self.path);
        Ok(())
    }
}
