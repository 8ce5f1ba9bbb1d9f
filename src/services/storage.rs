use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::window;

// Storage keys shared by the mock backend and the route guards.
pub const KEY_CLEANING_REQUESTS: &str = "cleaningRequests";
pub const KEY_AUTH_DATA: &str = "authData";
pub const KEY_OWNER_EMAIL: &str = "ownerEmail";
pub const KEY_CLEANER_AUTHENTICATED: &str = "cleanerAuthenticated";

/// Raw string key-value backend. The seam exists so services can run against
/// an in-memory backend in tests, and against localStorage in the browser.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
    fn delete(&self, key: &str) -> Result<(), String>;
}

/// Browser localStorage backend.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, String> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| "localStorage is not available".to_string())
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| format!("error reading key '{}' from localStorage", key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| format!("error writing key '{}' to localStorage", key))
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| format!("error removing key '{}' from localStorage", key))
    }
}

/// HashMap-backed storage for tests and non-browser targets.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON store over a raw backend with failure containment: backend and serde
/// failures are logged and converted into a safe default. Callers never see a
/// storage error.
#[derive(Clone)]
pub struct Store {
    backend: Rc<dyn StorageBackend>,
}

impl Store {
    pub fn local() -> Self {
        Self::with_backend(Rc::new(LocalStorage))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Rc::new(MemoryStorage::default()))
    }

    pub fn with_backend(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Read and decode a value, or None if absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::error!("Error reading from storage: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Error decoding key '{}' from storage: {}", key, e);
                None
            }
        }
    }

    /// Read and decode a value, falling back to `default` on any failure.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Encode and persist a value. Failures are logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Error encoding key '{}' for storage: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.write(key, &json) {
            log::error!("Error saving to storage: {}", e);
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            log::error!("Error removing from storage: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_json_values() {
        let store = Store::in_memory();
        store.set("answer", &vec![1, 2, 3]);
        assert_eq!(store.get::<Vec<i32>>("answer"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_yields_default() {
        let store = Store::in_memory();
        assert_eq!(store.get_or::<Vec<String>>("nothing", vec![]), Vec::<String>::new());
    }

    #[test]
    fn corrupt_json_is_contained() {
        let backend = Rc::new(MemoryStorage::default());
        backend.write("broken", "{not json").unwrap();

        let store = Store::with_backend(backend);
        assert_eq!(store.get::<Vec<i32>>("broken"), None);
        assert_eq!(store.get_or("broken", 7), 7);
    }

    #[test]
    fn remove_clears_the_key() {
        let store = Store::in_memory();
        store.set("k", &"v");
        store.remove("k");
        assert_eq!(store.get::<String>("k"), None);
    }
}
