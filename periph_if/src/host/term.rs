//! Terminal console

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::eqpt::{Console, ConsoleError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The operator console on the host terminal, with line editing and history.
pub struct TermConsole {
    editor: DefaultEditor,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TermConsole {
    pub fn new() -> Result<Self, ConsoleError> {
        let editor = DefaultEditor::new().map_err(map_readline_err)?;
        Ok(Self { editor })
    }
}

impl Console for TermConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        let line = self.editor.readline(prompt).map_err(map_readline_err)?;

        if !line.is_empty() {
            // History is a convenience, failing to record it is not an error
            if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                debug!("Could not add \"{}\" to the console history: {}", line, e);
            }
        }

        Ok(line)
    }

    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn map_readline_err(e: ReadlineError) -> ConsoleError {
    match e {
        ReadlineError::Eof | ReadlineError::Interrupted => ConsoleError::Closed,
        e => ConsoleError::Io(e.to_string()),
    }
}
