// rollcall - Student record store
// In-memory roll-number table over quadratic-probing open addressing

#![warn(rust_2018_idioms)]

pub mod config;
pub mod metrics;
pub mod shell;
pub mod table;

// Re-exports for convenience
pub use config::Settings;
pub use shell::{Command, Outcome, Session};
pub use table::{ProbingTable, RollNumber, SharedTable, SlotStatus, SlotSummary, CAPACITY};

/// rollcall error types
pub mod error {
    use crate::table::RollNumber;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("Roll number {roll} already exists at index {index}")]
        DuplicateKey { roll: RollNumber, index: usize },

        #[error("Table overflow: no reachable slot for roll number {roll}")]
        Overflow { roll: RollNumber },

        #[error("Not found: roll number {roll}")]
        NotFound { roll: RollNumber },

        #[error("Invalid command: {0}")]
        InvalidCommand(String),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Serialization error: {0}")]
        Serialization(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
