//! # Navigation library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to
//! access items defined inside the navigation crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Execution scheduler - owns the operating mode and decides which path drives the motors
pub mod exec_sched;

/// Navigation control module - PID, maneuver classification and motor mapping
pub mod nav_ctrl;

/// Range conversion - raw range codes to centimetres for diagnostics
pub mod range;

/// Reflectance sampler - RC discharge timing of the floor sensor
pub mod refl_sampler;
