use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::backend::StorageBackend;
use super::Collection;
use crate::error::{NoshError, Result};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since nosh is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    data: RefCell<HashMap<Collection, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes performed so far. Used by migration-idempotence tests.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        Ok(self.data.borrow().get(&collection).cloned())
    }

    fn write(&self, collection: Collection, payload: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(NoshError::Store("Simulated write error".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.data
            .borrow_mut()
            .insert(collection, payload.to_string());
        Ok(())
    }
}
