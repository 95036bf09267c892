//! # Peripheral interface crate.
//!
//! Provides the contracts between the navigation controller and the board it
//! runs on, plus the operator command vocabulary.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator commands read from the console
pub mod cmd;

/// Equipment traits (analog input, digital I/O, motors, delay, console, timer)
pub mod eqpt;

/// Simulated equipment, used for bench runs and tests
pub mod sim;

/// Equipment implementations for running on a host PC
pub mod host;
