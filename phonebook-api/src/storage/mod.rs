//! Persistence for the contact list.
//!
//! Every backend holds a single named slot containing the JSON array
//! `[{"id", "name", "number"}, ...]`. The filter text never reaches a slot.

pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use anyhow::{Context, Result};
use shared_types::Contact;

pub const DEFAULT_SLOT_KEY: &str = "contacts";

pub trait ContactStorage: Send + Sync {
    /// Reads the slot. `None` means nothing has been persisted yet.
    fn load(&self) -> Result<Option<Vec<Contact>>>;

    /// Replaces the slot with `contacts`.
    fn save(&self, contacts: &[Contact]) -> Result<()>;
}

pub fn encode_snapshot(contacts: &[Contact]) -> Result<String> {
    serde_json::to_string(contacts).context("Failed to serialize contacts snapshot")
}

/// A slot holding JSON `null` counts as empty, same as a missing one.
pub fn decode_snapshot(raw: &str) -> Result<Option<Vec<Contact>>> {
    serde_json::from_str::<Option<Vec<Contact>>>(raw)
        .context("Failed to parse contacts snapshot")
}
