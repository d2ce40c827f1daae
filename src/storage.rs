//! Local key/value storage for state that outlives a session.
//!
//! This module provides:
//! - `KeyValueStore`, the narrow interface the client state objects use
//! - `LocalStore`, durable per-app storage (one file per key on native,
//!   app-prefixed `localStorage` items in the browser)
//! - `MemoryStore`, a process-local store for tests and previews

use crate::error::{ClientError, ClientResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub const VISITOR_ID_KEY: &str = "visitor_id";
pub const THEME_KEY: &str = "theme";
pub const SUMMARIZED_CONTEXT_KEY: &str = "summarized_context";

/// Storage access used by every piece of client state. Writes are
/// last-write-wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
    fn keys(&self) -> Vec<String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

// ============================================
// In-memory store
// ============================================

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entries.lock() {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// All stored values, used to check that secrets never reach storage.
    pub fn values(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}

// ============================================
// Durable store
// ============================================

/// Durable storage namespaced by application name.
#[derive(Clone, Debug)]
pub struct LocalStore {
    app: String,
    #[cfg(not(target_arch = "wasm32"))]
    root: PathBuf,
}

impl LocalStore {
    /// Store under the platform data directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(app: &str) -> Self {
        let safe_app = sanitize_segment(app, usize::MAX);
        let root = match dirs::data_local_dir() {
            Some(data_dir) => data_dir.join(&safe_app).join("storage"),
            None => PathBuf::from("cache").join(&safe_app).join("storage"),
        };
        Self {
            app: safe_app,
            root,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(app: &str) -> Self {
        Self {
            app: sanitize_segment(app, usize::MAX),
        }
    }

    /// Store rooted at an explicit directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let app = root
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| sanitize_segment(name, usize::MAX))
            .unwrap_or_default();
        Self { app, root }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.txt", sanitize_segment(key, 64)))
    }

    /// Remove every key of this app.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear(&self) -> ClientResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .map_err(|e| ClientError::Storage(format!("Failed to clear storage: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn clear(&self) -> ClientResult<()> {
        let storage = browser_storage()?;
        for key in self.keys() {
            storage
                .remove_item(&self.item_key(&key))
                .map_err(|e| ClientError::Storage(format!("Failed to clear storage: {:?}", e)))?;
        }
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    fn item_key(&self, key: &str) -> String {
        browser_item_key(&self.app, key)
    }
}

/// localStorage is shared by every app on the origin, so item names carry
/// the app name as a prefix.
#[cfg(any(target_arch = "wasm32", test))]
fn browser_item_key(app: &str, key: &str) -> String {
    format!("{}_{}", app, key)
}

#[cfg(target_arch = "wasm32")]
fn browser_storage() -> ClientResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| ClientError::Storage("no window".to_string()))?
        .local_storage()
        .map_err(|e| ClientError::Storage(format!("localStorage blocked: {:?}", e)))?
        .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            ClientError::Storage(format!("Failed to create storage directory: {}", e))
        })?;
        fs::write(self.key_path(key), value)
            .map_err(|e| ClientError::Storage(format!("Failed to write to storage: {}", e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                ClientError::Storage(format!("Failed to delete from storage: {}", e))
            })?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        fs::read_dir(&self.root)
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                            return None;
                        }
                        path.file_stem()
                            .and_then(|s| s.to_str())
                            .map(|s| s.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        browser_storage()
            .ok()?
            .get_item(&self.item_key(key))
            .ok()
            .flatten()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        browser_storage()?
            .set_item(&self.item_key(key), value)
            .map_err(|e| ClientError::Storage(format!("Failed to write to storage: {:?}", e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        browser_storage()?
            .remove_item(&self.item_key(key))
            .map_err(|e| ClientError::Storage(format!("Failed to delete from storage: {:?}", e)))
    }

    fn keys(&self) -> Vec<String> {
        let Ok(storage) = browser_storage() else {
            return Vec::new();
        };
        let prefix = self.item_key("");
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

/// Make a name safe to use as a single path segment
fn sanitize_segment(raw: &str, max_len: usize) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect()
}
