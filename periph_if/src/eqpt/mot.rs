//! # Motor driver equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The two drive motors of the differential drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motor {
    Left,
    Right,
}

/// Rotation direction of a drive motor, set on the driver's phase line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A phase/enable motor driver fed by a PWM generator.
pub trait MotorDriver {
    /// Set the rotation direction of a motor.
    fn set_direction(&mut self, motor: Motor, dir: Direction);

    /// Set the duty cycle of a motor as a percentage of `period_ticks`.
    ///
    /// The pulse width written to hardware is given by [`pulse_width`].
    fn set_duty_cycle(&mut self, motor: Motor, percent: u32, period_ticks: u32);

    /// Enable or disable both PWM outputs.
    fn set_output_enabled(&mut self, enabled: bool);

    /// The PWM generator period, in generator clock ticks.
    fn period_ticks(&self) -> u32;
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Convert a duty percentage into a pulse width in generator ticks.
///
/// Integer arithmetic, the result truncates towards zero.
pub fn pulse_width(percent: u32, period_ticks: u32) -> u32 {
    let width = u64::from(percent) * u64::from(period_ticks) / 100;
    u32::try_from(width).unwrap_or(u32::MAX)
}
