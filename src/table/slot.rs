//! Slot lifecycle for the probing table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roll number used as the table key
pub type RollNumber = i64;

/// A live student record held by an occupied slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub roll: RollNumber,
    pub name: String,
}

impl Record {
    pub fn new(roll: RollNumber, name: impl Into<String>) -> Self {
        Self {
            roll,
            name: name.into(),
        }
    }
}

/// Observable state of a slot, as reported by the diagnostic dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    /// Never used
    Empty,
    /// Holds a live record
    #[serde(rename = "ACTIVE")]
    Occupied,
    /// Previously occupied, logically deleted
    #[serde(rename = "DELETED")]
    Tombstone,
}

impl SlotStatus {
    /// Display label used by the shell
    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Empty => "EMPTY",
            SlotStatus::Occupied => "ACTIVE",
            SlotStatus::Tombstone => "DELETED",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One position in the table
///
/// A tombstone keeps probe chains through this index intact. It carries no
/// record, so the key it once held can never be read back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Record),
    Tombstone,
}

impl Slot {
    /// Current status
    pub fn status(&self) -> SlotStatus {
        match self {
            Slot::Empty => SlotStatus::Empty,
            Slot::Occupied(_) => SlotStatus::Occupied,
            Slot::Tombstone => SlotStatus::Tombstone,
        }
    }

    /// Whether an insert may claim this slot
    pub fn is_available(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }

    /// Live record, if any
    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(record) => Some(record),
            _ => None,
        }
    }

    /// Whether this slot holds a live record for `roll`
    pub fn holds(&self, roll: RollNumber) -> bool {
        self.record().is_some_and(|r| r.roll == roll)
    }

    /// Store a record in this slot
    pub fn occupy(&mut self, record: Record) {
        *self = Slot::Occupied(record);
    }

    /// Logically delete the record, leaving a tombstone
    ///
    /// Returns the evicted record. Empty slots and tombstones are left as is.
    pub fn bury(&mut self) -> Option<Record> {
        match std::mem::take(self) {
            Slot::Occupied(record) => {
                *self = Slot::Tombstone;
                Some(record)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_defaults_to_empty() {
        let slot = Slot::default();
        assert_eq!(slot.status(), SlotStatus::Empty);
        assert!(slot.is_available());
        assert!(slot.record().is_none());
    }

    #[test]
    fn test_slot_lifecycle() {
        let mut slot = Slot::default();

        slot.occupy(Record::new(7, "Alice"));
        assert_eq!(slot.status(), SlotStatus::Occupied);
        assert!(!slot.is_available());
        assert!(slot.holds(7));
        assert!(!slot.holds(22));

        let evicted = slot.bury();
        assert_eq!(evicted, Some(Record::new(7, "Alice")));
        assert_eq!(slot.status(), SlotStatus::Tombstone);
        assert!(slot.is_available());
        assert!(!slot.holds(7));

        slot.occupy(Record::new(22, "Bob"));
        assert_eq!(slot.record().map(|r| r.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_bury_leaves_empty_slot_untouched() {
        let mut slot = Slot::Empty;
        assert!(slot.bury().is_none());
        assert_eq!(slot.status(), SlotStatus::Empty);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SlotStatus::Empty.to_string(), "EMPTY");
        assert_eq!(SlotStatus::Occupied.to_string(), "ACTIVE");
        assert_eq!(SlotStatus::Tombstone.to_string(), "DELETED");
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&SlotStatus::Tombstone).unwrap();
        assert_eq!(json, "\"DELETED\"");
        let json = serde_json::to_string(&SlotStatus::Occupied).unwrap();
        assert_eq!(json, "\"ACTIVE\"");
    }
}
