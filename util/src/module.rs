//! # Module interface
//!
//! Cyclic modules (for example `nav_ctrl`) expose their state through the
//! [`State`] trait. Initialisation happens once, `proc` once per tick.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

pub trait State {
    /// Passed to `init`, usually the parameter file path.
    type InitData;
    type InitError;

    /// Passed to every `proc` call.
    type InputData;
    /// Produced by every `proc` call.
    type OutputData;
    /// Diagnostic breakdown of a `proc` call.
    type StatusReport;
    type ProcError;

    /// Load parameters and open any archives inside the session.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process one tick.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
