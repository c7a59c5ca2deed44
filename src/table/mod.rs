//! Quadratic-probing record table
//!
//! # Architecture
//!
//! ```text
//! ProbingTable  [Slot; 15]
//!   ├─→ 0  EMPTY
//!   ├─→ 7  ACTIVE   7  → "Alice"     home(7)  = 7, attempt 0
//!   ├─→ 8  ACTIVE   22 → "Bob"       home(22) = 7, attempt 1
//!   ├─→ 11 DELETED                   tombstone, keeps the chain for 7 intact
//!   └─→ 14 EMPTY
//!
//! ProbeSequence(home) → (home + attempt²) mod 15, attempt = 0..15
//! ```
//!
//! Slots move `Empty → Occupied` or `Tombstone → Occupied` on insert. An
//! empty slot ends a search, a tombstone does not.

pub mod probe;
pub mod probing_table;
pub mod shared;
pub mod slot;

pub use probe::{home_index, probe_index, ProbeSequence};
pub use probing_table::{ProbingTable, SlotSummary, TableStats};
pub use shared::SharedTable;
pub use slot::{Record, RollNumber, Slot, SlotStatus};

/// Number of slots in every table
pub const CAPACITY: usize = 15;
