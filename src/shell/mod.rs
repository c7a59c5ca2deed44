//! Record shell
//!
//! Turns lines of user input into table operations and renders the results.
//! The table never sees text; the shell never touches slots directly.
//!
//! ```text
//! line ──→ Command::parse ──→ Session::execute ──→ ProbingTable
//!                                    │
//!                                    └──→ render (text | json) ──→ Outcome
//! ```

pub mod command;
pub mod render;

pub use command::Command;

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::metrics;
use crate::table::{ProbingTable, RollNumber};
use tracing::debug;

/// Result of executing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the message and keep reading commands
    Continue(String),
    /// Print the message without a newline and read the requested field
    Prompt(String),
    /// Print the message and stop
    Exit(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Continue(m) | Outcome::Prompt(m) | Outcome::Exit(m) => m,
        }
    }
}

/// Field the session is waiting for after a bare menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    InsertRoll,
    InsertName(RollNumber),
    SearchRoll,
}

/// A shell session owning one table
#[derive(Debug)]
pub struct Session {
    table: ProbingTable,
    output: OutputFormat,
    pending: Option<Pending>,
}

impl Session {
    pub fn new(output: OutputFormat) -> Self {
        Self::with_table(ProbingTable::new(), output)
    }

    pub fn with_table(table: ProbingTable, output: OutputFormat) -> Self {
        metrics::init_metrics();
        metrics::set_occupied(table.len());
        Self {
            table,
            output,
            pending: None,
        }
    }

    pub fn table(&self) -> &ProbingTable {
        &self.table
    }

    /// Whether the next line answers a field prompt
    pub fn is_prompting(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle one line of input. Blank lines outside a prompt yield `None`.
    pub fn execute_line(&mut self, line: &str) -> Option<Outcome> {
        if let Some(pending) = self.pending.take() {
            return Some(self.resume(pending, line.trim()));
        }

        match Command::parse(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(err) => Some(Outcome::Continue(self.render_failure(&err, None))),
        }
    }

    /// Run a parsed command
    pub fn execute(&mut self, command: Command) -> Outcome {
        debug!(?command, "Executing command");

        match command {
            Command::Insert { roll, name } => Outcome::Continue(self.insert(roll, &name)),
            Command::BeginInsert => {
                self.pending = Some(Pending::InsertRoll);
                Outcome::Prompt("Enter Roll Number: ".to_string())
            }
            Command::Search { roll } => Outcome::Continue(self.search(roll)),
            Command::BeginSearch => {
                self.pending = Some(Pending::SearchRoll);
                Outcome::Prompt("Enter Roll Number to Search: ".to_string())
            }
            Command::Display => {
                let rows = self.table.display();
                let text = match self.output {
                    OutputFormat::Text => Ok(render::table(&rows)),
                    OutputFormat::Json => render::to_json(&rows),
                };
                Outcome::Continue(text.unwrap_or_else(|e| e.to_string()))
            }
            Command::Probe { roll } => {
                let path = self.table.probe_path(roll);
                Outcome::Continue(render::probe_path(roll, &path))
            }
            Command::Stats => {
                let stats = self.table.stats();
                let text = match self.output {
                    OutputFormat::Text => Ok(render::stats(&stats, self.table.load_factor())),
                    OutputFormat::Json => render::to_json(&stats),
                };
                Outcome::Continue(text.unwrap_or_else(|e| e.to_string()))
            }
            Command::Metrics => Outcome::Continue(metrics::export_metrics()),
            Command::Help => Outcome::Continue(render::HELP.to_string()),
            Command::Exit => Outcome::Exit(render::GOODBYE.to_string()),
        }
    }

    fn resume(&mut self, pending: Pending, input: &str) -> Outcome {
        match pending {
            Pending::InsertRoll => match command::parse_roll(input) {
                Ok(roll) => {
                    self.pending = Some(Pending::InsertName(roll));
                    Outcome::Prompt("Enter Name: ".to_string())
                }
                Err(err) => Outcome::Continue(self.render_failure(&err, None)),
            },
            // The whole answer is the name, empty included
            Pending::InsertName(roll) => Outcome::Continue(self.insert(roll, input)),
            Pending::SearchRoll => match command::parse_roll(input) {
                Ok(roll) => Outcome::Continue(self.search(roll)),
                Err(err) => Outcome::Continue(self.render_failure(&err, None)),
            },
        }
    }

    fn insert(&mut self, roll: RollNumber, name: &str) -> String {
        match self.table.insert(roll, name) {
            Ok(index) => {
                metrics::set_occupied(self.table.len());
                match self.output {
                    OutputFormat::Text => render::inserted(name, index),
                    OutputFormat::Json => self.json(render::inserted_json(roll, index)),
                }
            }
            Err(err) => self.render_failure(&err, Some(name)),
        }
    }

    fn search(&self, roll: RollNumber) -> String {
        match self.table.search(roll) {
            Ok(name) => match self.output {
                OutputFormat::Text => render::found(roll, name),
                OutputFormat::Json => self.json(render::found_json(roll, name)),
            },
            Err(err) => self.render_failure(&err, None),
        }
    }

    fn render_failure(&self, err: &Error, name: Option<&str>) -> String {
        match self.output {
            OutputFormat::Text => render::failure(err, name),
            OutputFormat::Json => self.json(render::failure_json(err)),
        }
    }

    fn json(&self, rendered: Result<String>) -> String {
        rendered.unwrap_or_else(|e| e.to_string())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}
