//! Text menu shown when no subcommand is given.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::{Mode, TrainMode};

/// Reasons the menu could not produce a mode.
#[derive(Debug, Error)]
pub(crate) enum MenuError {
    /// The answer was not one of the listed numbers.
    #[error("invalid selection {choice:?}")]
    Invalid {
        /// What was typed, trimmed.
        choice: String,
    },
    /// Standard input closed before an answer arrived.
    #[error("no selection was made")]
    Closed,
    /// Reading or writing the terminal failed.
    #[error("terminal unavailable")]
    Io(#[from] io::Error),
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String, MenuError> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(MenuError::Closed);
    }
    Ok(line.trim().to_owned())
}

/// Asks which mode to run.
pub(crate) fn choose<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Mode, MenuError> {
    let choice = ask(input, output, "1) Train  2) Play  3) Replay\n> ")?;
    match choice.as_str() {
        "1" => {
            let how = ask(
                input,
                output,
                "1) Visual  2) Headless  3) Headless parallel\n> ",
            )?;
            let mode = match how.as_str() {
                "1" => TrainMode::Visual,
                "2" => TrainMode::Headless,
                "3" => TrainMode::Parallel,
                _ => return Err(MenuError::Invalid { choice: how }),
            };
            Ok(Mode::Train { mode })
        }
        "2" => Ok(Mode::Play),
        "3" => Ok(Mode::Replay { visual: true }),
        _ => Err(MenuError::Invalid { choice }),
    }
}

/// Prints `message` and blocks until the user presses Enter.
pub(crate) fn wait_for_enter<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<(), MenuError> {
    let _ = ask(input, output, &format!("{message}\nPress Enter to exit."))?;
    Ok(())
}
