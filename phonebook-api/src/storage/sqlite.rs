use super::{decode_snapshot, encode_snapshot, ContactStorage};
use anyhow::{anyhow, Context, Result};
use rusqlite::{Connection, OptionalExtension};
use shared_types::Contact;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Key-value slot kept in a SQLite `kv_store` table.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
    key: String,
}

impl SqliteStorage {
    pub fn open(db_path: &Path, key: &str) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open db at {:?}", db_path))?;
        Self::new(Arc::new(Mutex::new(conn)), key)
    }

    pub fn new(conn: Arc<Mutex<Connection>>, key: &str) -> Result<Self> {
        {
            let conn = conn.lock().map_err(|_| anyhow!("Database lock poisoned"))?;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )?;
        }

        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }
}

impl ContactStorage for SqliteStorage {
    fn load(&self) -> Result<Option<Vec<Contact>>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Database lock poisoned"))?;

        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                [&self.key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => decode_snapshot(&raw),
            None => Ok(None),
        }
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        let raw = encode_snapshot(contacts)?;
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Database lock poisoned"))?;

        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![self.key, raw],
        )?;

        Ok(())
    }
}
