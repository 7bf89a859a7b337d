use std::cell::RefCell;
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// In-process store. Used in tests and when the database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
