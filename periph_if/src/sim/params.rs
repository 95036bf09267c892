//! Parameters for the simulated board

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SimParams {
    /// PWM generator period reported by the simulated motor driver.
    ///
    /// Units: generator ticks
    pub pwm_period_ticks: u32,

    /// Raw code returned on the right range channel.
    pub right_range: u32,

    /// Raw code returned on the front range channel.
    pub front_range: u32,

    /// Number of high reads before the reflectance line discharges, or
    /// `None` for a line which never discharges.
    pub refl_discharge_reads: Option<u32>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            pwm_period_ticks: 61,
            right_range: 2048,
            front_range: 1700,
            refl_discharge_reads: Some(1500),
        }
    }
}
