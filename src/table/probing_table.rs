//! Fixed-capacity open-addressed table with quadratic probing

use super::probe::{home_index, ProbeSequence};
use super::slot::{Record, RollNumber, Slot, SlotStatus};
use super::CAPACITY;
use crate::error::{Error, Result};
use crate::metrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One row of the diagnostic dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub index: usize,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub roll: Option<RollNumber>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// Slot counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub empty: usize,
    pub occupied: usize,
    pub tombstones: usize,
}

/// Student records keyed by roll number
///
/// Holds exactly [`CAPACITY`] slots inline. Collisions are resolved with the
/// sequence `(home + attempt²) mod CAPACITY`, tried at most `CAPACITY` times,
/// so an insert can overflow while unreachable slots are still free.
#[derive(Debug, Clone)]
pub struct ProbingTable {
    slots: [Slot; CAPACITY],
}

impl ProbingTable {
    /// Create a table with every slot empty
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::Empty),
        }
    }

    /// Insert a record, returning the slot index it landed in
    ///
    /// The first empty or tombstoned slot on the probe path wins. A live
    /// record with the same roll seen before that point rejects the insert
    /// with [`Error::DuplicateKey`]. If every attempt hits another roll the
    /// insert fails with [`Error::Overflow`]. The table is only modified on
    /// success.
    pub fn insert(&mut self, roll: RollNumber, name: impl Into<String>) -> Result<usize> {
        let name = name.into();

        for (attempt, index) in ProbeSequence::new(roll) {
            let slot = &mut self.slots[index];

            if slot.is_available() {
                slot.occupy(Record::new(roll, name));
                metrics::record_operation("insert", "ok", attempt + 1);
                debug!(roll, index, attempt, "Inserted record");
                return Ok(index);
            }

            if slot.holds(roll) {
                metrics::record_operation("insert", "duplicate", attempt + 1);
                debug!(roll, index, "Duplicate roll number");
                return Err(Error::DuplicateKey { roll, index });
            }
        }

        metrics::record_operation("insert", "overflow", CAPACITY);
        warn!(roll, home = home_index(roll), "Probe sequence exhausted");
        Err(Error::Overflow { roll })
    }

    /// Look up the name stored for a roll number
    ///
    /// An empty slot ends the search. Tombstones do not: the roll may have
    /// been placed further along the chain before the slot was vacated.
    pub fn search(&self, roll: RollNumber) -> Result<&str> {
        for (attempt, index) in ProbeSequence::new(roll) {
            match &self.slots[index] {
                Slot::Empty => {
                    metrics::record_operation("search", "not_found", attempt + 1);
                    debug!(roll, index, attempt, "Hit empty slot");
                    return Err(Error::NotFound { roll });
                }
                Slot::Occupied(record) if record.roll == roll => {
                    metrics::record_operation("search", "found", attempt + 1);
                    debug!(roll, index, attempt, "Found record");
                    return Ok(record.name.as_str());
                }
                _ => {}
            }
        }

        metrics::record_operation("search", "not_found", CAPACITY);
        debug!(roll, "Probe sequence exhausted");
        Err(Error::NotFound { roll })
    }

    /// Snapshot of every slot in index order
    pub fn display(&self) -> Vec<SlotSummary> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotSummary {
                index,
                status: slot.status(),
                roll: slot.record().map(|r| r.roll),
                name: slot.record().map(|r| r.name.clone()),
            })
            .collect()
    }

    /// Indices a search for `roll` visits, up to and including where it stops
    pub fn probe_path(&self, roll: RollNumber) -> Vec<usize> {
        let mut path = Vec::new();
        for (_, index) in ProbeSequence::new(roll) {
            path.push(index);
            let slot = &self.slots[index];
            if slot.status() == SlotStatus::Empty || slot.holds(roll) {
                break;
            }
        }
        path
    }

    /// Live records with their slot index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.record().map(|r| (index, r)))
    }

    /// Slot at `index`, if in range
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.status() == SlotStatus::Occupied)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Fraction of slots holding live records
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / CAPACITY as f64
    }

    /// Count slots by status
    pub fn stats(&self) -> TableStats {
        self.slots
            .iter()
            .fold(TableStats::default(), |mut stats, slot| {
                match slot.status() {
                    SlotStatus::Empty => stats.empty += 1,
                    SlotStatus::Occupied => stats.occupied += 1,
                    SlotStatus::Tombstone => stats.tombstones += 1,
                }
                stats
            })
    }

    #[cfg(test)]
    pub(crate) fn bury_at(&mut self, index: usize) -> Option<Record> {
        self.slots[index].bury()
    }
}

impl Default for ProbingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = ProbingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 15);
        assert_eq!(
            table.stats(),
            TableStats {
                empty: 15,
                occupied: 0,
                tombstones: 0
            }
        );
    }

    #[test]
    fn test_collision_walks_quadratic_path() -> Result<()> {
        let mut table = ProbingTable::new();

        assert_eq!(table.insert(7, "Alice")?, 7);
        assert_eq!(table.insert(22, "Bob")?, 8);
        assert_eq!(table.insert(37, "Carol")?, 11);
        assert_eq!(table.insert(52, "Dave")?, 1);

        assert_eq!(table.search(52)?, "Dave");
        Ok(())
    }

    #[test]
    fn test_duplicate_leaves_table_unchanged() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        let before = table.display();

        let err = table.insert(7, "Mallory").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { roll: 7, index: 7 });
        assert_eq!(table.display(), before);
        assert_eq!(table.search(7)?, "Alice");
        Ok(())
    }

    #[test]
    fn test_duplicate_found_after_collision() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        table.insert(22, "Bob")?;

        let err = table.insert(22, "Bobby").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { roll: 22, index: 8 });
        Ok(())
    }

    #[test]
    fn test_insert_reuses_tombstone() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        table.insert(22, "Bob")?;

        assert_eq!(table.bury_at(7), Some(Record::new(7, "Alice")));
        assert_eq!(table.stats().tombstones, 1);

        // 37 starts at 7 too and claims the tombstone
        assert_eq!(table.insert(37, "Carol")?, 7);
        assert_eq!(table.stats().tombstones, 0);
        assert_eq!(table.search(37)?, "Carol");
        Ok(())
    }

    #[test]
    fn test_search_probes_past_tombstone() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        table.insert(22, "Bob")?;
        table.bury_at(7);

        assert_eq!(table.search(22)?, "Bob");
        assert_eq!(table.search(7), Err(Error::NotFound { roll: 7 }));
        assert_eq!(table.probe_path(7), vec![7, 8, 11]);
        Ok(())
    }

    #[test]
    fn test_tombstone_hides_record_in_display() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(3, "Eve")?;
        table.bury_at(3);

        let row = &table.display()[3];
        assert_eq!(row.status, SlotStatus::Tombstone);
        assert_eq!(row.roll, None);
        assert_eq!(row.name, None);
        Ok(())
    }

    #[test]
    fn test_duplicate_after_free_slot_is_not_detected() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        table.insert(22, "Bob")?;
        table.bury_at(7);

        // First fit wins: the tombstone at 7 is taken before 8 is checked
        assert_eq!(table.insert(22, "Bob again")?, 7);
        assert_eq!(table.len(), 2);
        Ok(())
    }

    #[test]
    fn test_negative_rolls() -> Result<()> {
        let mut table = ProbingTable::new();
        assert_eq!(table.insert(-1, "Neg")?, 14);
        assert_eq!(table.insert(RollNumber::MIN, "Min")?, home_index(RollNumber::MIN));
        assert_eq!(table.search(-1)?, "Neg");
        assert_eq!(table.search(RollNumber::MIN)?, "Min");
        Ok(())
    }

    #[test]
    fn test_iter_and_load_factor() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(1, "A")?;
        table.insert(2, "B")?;
        table.insert(3, "C")?;

        let rolls: Vec<RollNumber> = table.iter().map(|(_, r)| r.roll).collect();
        assert_eq!(rolls, vec![1, 2, 3]);
        assert!((table.load_factor() - 0.2).abs() < f64::EPSILON);
        assert!(table.slot(15).is_none());
        Ok(())
    }

    #[test]
    fn test_probe_path_stops_at_match() -> Result<()> {
        let mut table = ProbingTable::new();
        table.insert(7, "Alice")?;
        table.insert(22, "Bob")?;

        assert_eq!(table.probe_path(22), vec![7, 8]);
        assert_eq!(table.probe_path(37), vec![7, 8, 11]);
        Ok(())
    }
}
