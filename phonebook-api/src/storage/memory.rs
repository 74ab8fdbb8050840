use super::{decode_snapshot, encode_snapshot, ContactStorage};
use anyhow::{anyhow, Result};
use shared_types::Contact;
use std::sync::Mutex;

/// Process-local slot. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a pre-filled slot, as if a previous session had saved it.
    pub fn with_contacts(contacts: &[Contact]) -> Result<Self> {
        Ok(Self {
            slot: Mutex::new(Some(encode_snapshot(contacts)?)),
        })
    }

    /// Raw JSON currently held in the slot
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl ContactStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("Memory slot lock poisoned"))?;

        match slot.as_deref() {
            Some(raw) => decode_snapshot(raw),
            None => Ok(None),
        }
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        let raw = encode_snapshot(contacts)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("Memory slot lock poisoned"))?;
        *slot = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_contacts;

    #[test]
    fn test_empty_until_saved() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.save(&seed_contacts()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(seed_contacts()));
    }
}
