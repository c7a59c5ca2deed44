//! Command parsing for the record shell

use crate::error::{Error, Result};
use crate::table::RollNumber;
use std::str::FromStr;

/// One shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `insert <roll> <name...>` or `1 <roll> <name...>`
    Insert { roll: RollNumber, name: String },
    /// `insert` with no arguments; the session prompts for roll and name
    BeginInsert,
    /// `search <roll>` or `2 <roll>`
    Search { roll: RollNumber },
    /// `search` with no arguments; the session prompts for the roll
    BeginSearch,
    /// `display` or `3`
    Display,
    /// `probe <roll>`: show the slots a search would visit
    Probe { roll: RollNumber },
    Stats,
    Metrics,
    Help,
    /// `exit`, `quit` or `4`
    Exit,
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = split_token(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "1" | "insert" => {
                if rest.is_empty() {
                    Command::BeginInsert
                } else {
                    let (roll, name) = split_token(rest);
                    let roll = parse_roll(roll)?;
                    if name.is_empty() {
                        return Err(Error::InvalidCommand(
                            "usage: insert <roll> <name>".to_string(),
                        ));
                    }
                    Command::Insert {
                        roll,
                        name: name.to_string(),
                    }
                }
            }
            "2" | "search" => {
                if rest.is_empty() {
                    Command::BeginSearch
                } else {
                    Command::Search {
                        roll: single_roll(rest, "search")?,
                    }
                }
            }
            "probe" => Command::Probe {
                roll: single_roll(rest, "probe")?,
            },
            "3" | "display" => no_args(rest, "display", Command::Display)?,
            "stats" => no_args(rest, "stats", Command::Stats)?,
            "metrics" => no_args(rest, "metrics", Command::Metrics)?,
            "help" | "?" => Command::Help,
            "4" | "exit" | "quit" => Command::Exit,
            other => {
                return Err(Error::InvalidCommand(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)?.ok_or_else(|| Error::InvalidCommand("empty input".to_string()))
    }
}

/// Parse a roll number
pub fn parse_roll(text: &str) -> Result<RollNumber> {
    let text = text.trim();
    text.parse::<RollNumber>()
        .map_err(|_| Error::InvalidCommand(format!("'{}' is not a valid roll number", text)))
}

fn single_roll(rest: &str, name: &str) -> Result<RollNumber> {
    let (roll, extra) = split_token(rest);
    if roll.is_empty() || !extra.is_empty() {
        return Err(Error::InvalidCommand(format!("usage: {} <roll>", name)));
    }
    parse_roll(roll)
}

fn no_args(rest: &str, name: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(Error::InvalidCommand(format!("{} takes no arguments", name)))
    }
}

/// Split off the first whitespace-delimited token
fn split_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim()),
        None => (text, ""),
    }
}
