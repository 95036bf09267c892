//! # Periodic timer

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::Duration;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Work run on every timer period.
pub type TickHandler = Box<dyn FnMut() + Send + 'static>;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("The timer has already been started")]
    AlreadyStarted,

    #[error("The timer period must be non-zero")]
    ZeroPeriod,

    #[error("Could not start the timer context: {0}")]
    StartFailed(String),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A hardware timer which calls a handler at a fixed period.
///
/// Once started the handler owns whatever it captured for the rest of the
/// execution, there is no way to stop the timer.
pub trait PeriodicTimer {
    fn start(&mut self, period: Duration, handler: TickHandler) -> Result<(), TimerError>;
}
