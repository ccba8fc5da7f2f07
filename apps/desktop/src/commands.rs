//! Line commands typed into the terminal front end.

use shared::{domain::LengthUnit, error::UnknownUnit};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  value <number>   set the value to convert
  from <unit>      set the source unit
  to <unit>        set the target unit
  convert          convert and remember the result
  swap             swap source and target units
  copy             copy the recent conversion to the clipboard
  show             print the current state
  units            list supported units
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SetInput(String),
    SetFromUnit(LengthUnit),
    SetToUnit(LengthUnit),
    Convert,
    Swap,
    Copy,
    Show,
    Units,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    UnknownUnit(#[from] UnknownUnit),
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        // The raw text goes to the controller unvalidated.
        "value" | "v" => UiCommand::SetInput(rest.to_string()),
        "from" => UiCommand::SetFromUnit(unit_argument("from", rest)?),
        "to" => UiCommand::SetToUnit(unit_argument("to", rest)?),
        "convert" | "c" => UiCommand::Convert,
        "swap" | "s" => UiCommand::Swap,
        "copy" => UiCommand::Copy,
        "show" => UiCommand::Show,
        "units" => UiCommand::Units,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" | "q" => UiCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn unit_argument(verb: &'static str, rest: &str) -> Result<LengthUnit, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(verb));
    }
    Ok(rest.parse::<LengthUnit>()?)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
