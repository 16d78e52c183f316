use super::backend::StorageBackend;
use crate::error::{CopyError, Result};
use crate::model::{PersistedRecord, Scope};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since reconciliation is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without a lock.
#[derive(Default)]
pub struct MemBackend {
    collections: RefCell<HashMap<Scope, HashMap<Uuid, PersistedRecord>>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    // Remaining successful writes before every further write fails.
    writes_before_failure: Cell<Option<usize>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Let `count` writes succeed, then fail every write after them.
    pub fn fail_writes_after(&self, count: usize) {
        self.writes_before_failure.set(Some(count));
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CopyError::Store("Simulated write error".to_string()));
        }
        match self.writes_before_failure.get() {
            Some(0) => Err(CopyError::Store("Simulated write error".to_string())),
            Some(n) => {
                self.writes_before_failure.set(Some(n - 1));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl StorageBackend for MemBackend {
    fn load_collection(&self, scope: &Scope) -> Result<HashMap<Uuid, PersistedRecord>> {
        if self.simulate_read_error.get() {
            return Err(CopyError::Store("Simulated read error".to_string()));
        }
        let collections = self.collections.borrow();
        Ok(collections.get(scope).cloned().unwrap_or_default())
    }

    fn save_collection(
        &self,
        scope: &Scope,
        records: &HashMap<Uuid, PersistedRecord>,
    ) -> Result<()> {
        self.check_write()?;
        let mut collections = self.collections.borrow_mut();
        collections.insert(scope.clone(), records.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Scope {
        Scope::new("site", "user")
    }

    #[test]
    fn fail_writes_after_counts_down() {
        let backend = MemBackend::new();
        backend.fail_writes_after(1);

        assert!(backend.save_collection(&scope(), &HashMap::new()).is_ok());
        assert!(backend.save_collection(&scope(), &HashMap::new()).is_err());
        assert!(backend.save_collection(&scope(), &HashMap::new()).is_err());
    }

    #[test]
    fn read_error_is_a_store_error() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let err = backend.load_collection(&scope()).unwrap_err();
        assert!(err.is_store_error());
    }
}
