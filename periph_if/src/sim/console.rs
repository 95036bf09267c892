//! Scripted console

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::eqpt::{Console, ConsoleError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A console fed from a queue of lines, recording everything written to it.
///
/// Once the queue is empty reads return `ConsoleError::Closed`.
#[derive(Clone, Default)]
pub struct ScriptConsole {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Default)]
struct ScriptState {
    input: VecDeque<String>,
    output: Vec<String>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ScriptConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = Self::default();
        for l in lines {
            console.push_line(l);
        }
        console
    }

    /// Queue another line of operator input.
    pub fn push_line<S: Into<String>>(&self, line: S) {
        lock(&self.state).input.push_back(line.into());
    }

    /// Every line written so far.
    pub fn output(&self) -> Vec<String> {
        lock(&self.state).output.clone()
    }

    /// Discard the recorded output.
    pub fn clear_output(&self) {
        lock(&self.state).output.clear();
    }
}

impl Console for ScriptConsole {
    fn read_line(&mut self, _prompt: &str) -> Result<String, ConsoleError> {
        lock(&self.state).input.pop_front().ok_or(ConsoleError::Closed)
    }

    fn write_line(&mut self, line: &str) {
        lock(&self.state).output.push(line.to_string());
    }
}
