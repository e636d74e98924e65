//! Yes/no confirmation before destructive operations.
//!
//! The core only decides *whether* to ask and what to do with the answer; how the
//! question reaches the user is up to the [`UserPrompt`] implementation.

use crate::error::{NotesError, Result};
use std::io::{self, BufRead, Write};

pub trait UserPrompt {
    /// Ask `message` and block until the user answers. `true` means proceed.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Asks on stdout and reads the answer from stdin. Only `y`/`yes` confirm.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl UserPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        print!("{} [y/N]: ", message);
        io::stdout().flush().map_err(NotesError::Io)?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(NotesError::Io)?;
        Ok(is_yes(&input))
    }
}

/// Answers every question the same way without asking (`--yes`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl UserPrompt for FixedAnswer {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        tracing::debug!(message, answer = self.0, "confirmation answered without asking");
        Ok(self.0)
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
