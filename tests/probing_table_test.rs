//! End-to-end behavior of the probing table through its public API

use rollcall::error::{Error, Result};
use rollcall::table::{ProbingTable, SlotStatus, CAPACITY};

#[test]
fn test_insert_then_search_returns_value() -> Result<()> {
    let mut table = ProbingTable::new();

    for roll in [3, 18, 4, 100, -7, 2024] {
        table.insert(roll, format!("student {}", roll))?;
        assert_eq!(table.search(roll)?, format!("student {}", roll));
    }

    assert_eq!(table.len(), 6);
    Ok(())
}

#[test]
fn test_duplicate_insert_preserves_original() -> Result<()> {
    let mut table = ProbingTable::new();
    table.insert(42, "First")?;
    let occupied = table.stats().occupied;

    let err = table.insert(42, "Second").unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { roll: 42, .. }));
    assert_eq!(table.stats().occupied, occupied);
    assert_eq!(table.search(42)?, "First");
    Ok(())
}

#[test]
fn test_same_home_keys_overflow_before_table_is_full() -> Result<()> {
    let mut table = ProbingTable::new();
    let rolls: Vec<i64> = (0..CAPACITY as i64).map(|k| k * 15).collect();

    let mut placed = Vec::new();
    let mut overflowed = Vec::new();
    for roll in rolls {
        match table.insert(roll, format!("r{}", roll)) {
            Ok(index) => placed.push(index),
            Err(Error::Overflow { roll }) => overflowed.push(roll),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    // Squares mod 15 only reach six distinct offsets from home 0
    assert_eq!(placed, vec![0, 1, 4, 9, 10, 6]);
    assert_eq!(overflowed.first(), Some(&90));
    assert_eq!(overflowed.len(), CAPACITY - 6);

    // Free slots remain even though the inserts overflowed
    assert_eq!(table.stats().empty, CAPACITY - 6);
    Ok(())
}

#[test]
fn test_overflow_leaves_table_unchanged() -> Result<()> {
    let mut table = ProbingTable::new();
    for k in 0..6 {
        table.insert(k * 15, "filler")?;
    }
    let before = table.display();

    assert_eq!(table.insert(90, "late"), Err(Error::Overflow { roll: 90 }));
    assert_eq!(table.display(), before);
    assert_eq!(table.search(90), Err(Error::NotFound { roll: 90 }));
    Ok(())
}

#[test]
fn test_display_lists_touched_slots_in_order() -> Result<()> {
    let mut table = ProbingTable::new();
    table.insert(7, "Alice")?;
    table.insert(22, "Bob")?;
    table.insert(2, "Cleo")?;

    let rows = table.display();
    assert_eq!(rows.len(), CAPACITY);

    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i);
        match i {
            2 | 7 | 8 => assert_eq!(row.status, SlotStatus::Occupied),
            _ => {
                assert_eq!(row.status, SlotStatus::Empty);
                assert!(row.roll.is_none() && row.name.is_none());
            }
        }
    }

    assert_eq!(rows[8].roll, Some(22));
    assert_eq!(rows[8].name.as_deref(), Some("Bob"));

    // Repeatable with no intervening mutation
    assert_eq!(table.display(), rows);
    Ok(())
}

#[test]
fn test_search_on_empty_table() {
    let table = ProbingTable::new();
    for roll in [0, 1, 14, 15, -1, i64::MAX] {
        assert_eq!(table.search(roll), Err(Error::NotFound { roll }));
    }
}

#[test]
fn test_alice_bob_walkthrough() -> Result<()> {
    let mut table = ProbingTable::new();

    assert_eq!(table.insert(7, "Alice")?, 7);
    assert_eq!(table.insert(22, "Bob")?, 8);
    assert_eq!(table.search(22)?, "Bob");

    assert_eq!(table.probe_path(37), vec![7, 8, 11]);
    assert_eq!(table.search(37), Err(Error::NotFound { roll: 37 }));
    Ok(())
}

#[test]
fn test_extreme_rolls_stay_in_range() -> Result<()> {
    let mut table = ProbingTable::new();
    let min = table.insert(i64::MIN, "min")?;
    let max = table.insert(i64::MAX, "max")?;

    assert!(min < CAPACITY && max < CAPACITY);
    assert_eq!(table.search(i64::MIN)?, "min");
    assert_eq!(table.search(i64::MAX)?, "max");
    Ok(())
}
