//! Thread-safe handle around a single table
//!
//! The probing algorithm is not built for fine-grained concurrent mutation,
//! so every operation takes one lock over the whole table.

use super::probing_table::{ProbingTable, SlotSummary, TableStats};
use super::slot::RollNumber;
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-protected table handle
#[derive(Debug, Clone, Default)]
pub struct SharedTable {
    inner: Arc<Mutex<ProbingTable>>,
}

impl SharedTable {
    pub fn new() -> Self {
        Self::from_table(ProbingTable::new())
    }

    pub fn from_table(table: ProbingTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Insert under the table lock
    pub fn insert(&self, roll: RollNumber, name: impl Into<String>) -> Result<usize> {
        self.inner.lock().insert(roll, name)
    }

    /// Search under the table lock, returning an owned name
    pub fn search(&self, roll: RollNumber) -> Result<String> {
        self.inner.lock().search(roll).map(str::to_owned)
    }

    pub fn display(&self) -> Vec<SlotSummary> {
        self.inner.lock().display()
    }

    pub fn stats(&self) -> TableStats {
        self.inner.lock().stats()
    }

    /// Run a closure with exclusive access to the table
    pub fn with<R>(&self, f: impl FnOnce(&mut ProbingTable) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
