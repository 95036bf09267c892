//! # Operator console

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("The console input has been closed")]
    Closed,

    #[error("Console I/O error: {0}")]
    Io(String),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A line based text console (the serial terminal on the vehicle).
pub trait Console {
    /// Block until the operator enters a line.
    ///
    /// The returned line has its line ending removed.
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    /// Emit a line of text to the operator.
    fn write_line(&mut self, line: &str);
}
