use super::backend::StorageBackend;
use crate::error::{MoodiaryError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets `StorageBackend` take `&self` everywhere.
#[derive(Debug, Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with raw contents under `key`
    pub fn with_contents(key: &str, contents: &str) -> Self {
        let backend = Self::new();
        backend
            .slots
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw contents under `key`, bypassing the trait
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MoodiaryError::Storage(
                "Simulated write error".to_string(),
            ));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
