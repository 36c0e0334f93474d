//! Origin-scoped string storage behind an injected interface.
//!
//! Reads and writes are whole-value: list append is read-modify-write of
//! the entire serialized array, so concurrent writers can lose updates.
//! Callers treat this as best-effort, single-writer-in-practice storage.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::warn;

pub const COMMENTS_KEY: &str = "comments";
pub const COMPLAINTS_KEY: &str = "complaints";

pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn clear(&self, key: &str);
}

/// One file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("failed to create storage directory {}: {e}", dir.display());
        }
        Self { dir }
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.dir.join(key), value) {
            warn!("failed to persist '{key}': {e}");
        }
    }

    fn clear(&self, key: &str) {
        let _ = fs::remove_file(self.dir.join(key));
    }
}

/// In-memory substitute for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn clear(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Stored array under `key`; absent or unparsable values read as empty.
pub fn read_array(store: &dyn Storage, key: &str) -> Vec<Value> {
    store
        .get(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Whole-array read-modify-write append.
pub fn append(store: &dyn Storage, key: &str, item: Value) {
    let mut items = read_array(store, key);
    items.push(item);

    match serde_json::to_string(&items) {
        Ok(serialized) => store.set(key, &serialized),
        Err(e) => warn!("failed to serialize '{key}': {e}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_garbage_values_read_as_empty() {
        let store = MemoryStore::new();
        assert!(read_array(&store, COMMENTS_KEY).is_empty());

        store.set(COMMENTS_KEY, "not json");
        assert!(read_array(&store, COMMENTS_KEY).is_empty());
    }

    #[test]
    fn append_is_whole_array_rmw() {
        let store = MemoryStore::new();
        append(&store, COMMENTS_KEY, json!({"user": "Ann", "text": "great"}));
        append(&store, COMMENTS_KEY, json!({"user": "Bo", "text": "fine"}));

        let items = read_array(&store, COMMENTS_KEY);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["user"], "Bo");
    }

    #[test]
    fn clear_removes_the_key() {
        let store = MemoryStore::new();
        append(&store, COMPLAINTS_KEY, json!({"text": "stale snacks"}));
        store.clear(COMPLAINTS_KEY);
        assert!(store.get(COMPLAINTS_KEY).is_none());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = std::env::temp_dir().join(format!("vending-store-{}", std::process::id()));
        let store = FileStore::new(&dir);

        store.set(COMMENTS_KEY, r#"[{"user":"Ann"}]"#);
        assert_eq!(read_array(&store, COMMENTS_KEY).len(), 1);

        store.clear(COMMENTS_KEY);
        assert!(store.get(COMMENTS_KEY).is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
