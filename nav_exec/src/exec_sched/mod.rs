//! # Execution scheduler
//!
//! The scheduler starts in the menu and dispatches exactly once into one of
//! the operating modes, which then runs until the board is reset:
//!
//! | Token | Mode | Motors |
//! |---|---|---|
//! | `DS` | [`ExecMode::DiagnosticLoop`] | never touched |
//! | `LS` | [`ExecMode::ReflectanceLoop`] | never touched |
//! | `MS` | [`ExecMode::ManualOverride`] | operator commands |
//! | `PD` | [`ExecMode::InterruptControl`] | timer driven control ticks |
//!
//! If the timer cannot be started the scheduler ends in
//! [`ExecMode::Halted`] with the motor outputs still disabled.
//!
//! On entering `InterruptControl` the control core is moved into the timer
//! handler, after which nothing in the foreground can reach the controller
//! or the peripherals.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod manual;
mod params;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use manual::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::eqpt::{ConsoleError, TimerError};
use serde::Serialize;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Operating mode of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecMode {
    MenuIdle,
    DiagnosticLoop,
    ReflectanceLoop,
    ManualOverride,
    InterruptControl,

    /// Control could not be handed to the timer, the core is gone.
    Halted,
}

/// Faults which end a mode loop.
#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    #[error("Console fault: {0}")]
    Console(#[from] ConsoleError),

    #[error("Could not start the control timer: {0}")]
    Timer(#[from] TimerError),

    #[error("The control core has been handed to the timer")]
    CoreReleased,

    #[error("Step for {expected:?} called while in {actual:?}")]
    WrongMode { expected: ExecMode, actual: ExecMode },
}
