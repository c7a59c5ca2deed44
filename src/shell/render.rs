//! Text and JSON rendering of table results

use crate::error::{Error, Result};
use crate::table::{RollNumber, SlotSummary, TableStats};
use serde::Serialize;
use serde_json::json;

pub const MENU: &str = "\n1. Insert Record\n2. Search Record\n3. Display Table\n4. Exit";

pub const HELP: &str = "\
Commands:
  insert <roll> <name>   (1)  add a record
  search <roll>          (2)  look up a record
  display                (3)  dump every slot
  exit                   (4)  leave the shell
  probe <roll>                show the slots a search visits
  stats                       slot counts and load factor
  metrics                     Prometheus metrics
  help                        this text";

pub const GOODBYE: &str = "Exiting system. Goodbye!";

const RULE_WIDTH: usize = 45;

/// Serialize a value as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))
}

pub fn inserted(name: &str, index: usize) -> String {
    format!("Record for '{}' inserted at index {}.", name, index)
}

pub fn inserted_json(roll: RollNumber, index: usize) -> Result<String> {
    to_json(&json!({ "roll": roll, "inserted_at": index }))
}

pub fn found(roll: RollNumber, name: &str) -> String {
    format!("Roll: {} | Name: {}", roll, name)
}

pub fn found_json(roll: RollNumber, name: &str) -> Result<String> {
    to_json(&json!({ "roll": roll, "found": name }))
}

/// Human-readable message for a failed operation
///
/// `name` is the record being inserted, when there is one.
pub fn failure(err: &Error, name: Option<&str>) -> String {
    match err {
        Error::DuplicateKey { roll, .. } => {
            format!("Roll number {} already exists in the system.", roll)
        }
        Error::Overflow { roll } => match name {
            Some(name) => format!("Table overflow! Cannot insert {}.", name),
            None => format!("Table overflow! Cannot insert roll number {}.", roll),
        },
        Error::NotFound { roll } => format!("No record exists for roll number {}.", roll),
        other => other.to_string(),
    }
}

pub fn failure_json(err: &Error) -> Result<String> {
    let kind = match err {
        Error::DuplicateKey { .. } => "DuplicateKey",
        Error::Overflow { .. } => "Overflow",
        Error::NotFound { .. } => "NotFound",
        Error::InvalidCommand(_) => "InvalidCommand",
        Error::Config(_) => "Config",
        Error::Serialization(_) => "Serialization",
    };
    to_json(&json!({ "error": kind, "message": err.to_string() }))
}

/// Fixed-width table of every slot
pub fn table(rows: &[SlotSummary]) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<8}{:<12}{:<15}{}\n",
        "Index", "Status", "Roll No", "Name"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for row in rows {
        match (row.roll, row.name.as_deref()) {
            (Some(roll), Some(name)) => out.push_str(&format!(
                "{:<8}{:<12}{:<15}{}\n",
                row.index,
                row.status.label(),
                roll,
                name
            )),
            _ => out.push_str(&format!("{:<8}{:<12}---\n", row.index, row.status.label())),
        }
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out
}

pub fn probe_path(roll: RollNumber, path: &[usize]) -> String {
    let steps: Vec<String> = path.iter().map(|i| i.to_string()).collect();
    format!("Probe path for {}: {}", roll, steps.join(" -> "))
}

pub fn stats(stats: &TableStats, load_factor: f64) -> String {
    format!(
        "Occupied: {} | Deleted: {} | Empty: {} | Load factor: {:.2}",
        stats.occupied, stats.tombstones, stats.empty, load_factor
    )
}
