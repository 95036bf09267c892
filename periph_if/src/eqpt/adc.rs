//! # Analog range sensor input

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of distinct codes the ADC can produce (12 bit).
pub const ADC_NUM_CODES: u32 = 4096;

/// Highest code the ADC can produce.
pub const ADC_MAX_READING: u32 = ADC_NUM_CODES - 1;

/// Full scale voltage of the ADC.
///
/// Units: volts
pub const ADC_FULL_SCALE_V: f64 = 3.0;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Logical range sensor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeChannel {
    /// Side facing sensor, used for wall tracking.
    Right,

    /// Forward facing sensor, used for obstacle proximity.
    Front,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// An analog front end which can sample the range sensors.
pub trait AnalogIn {
    /// Trigger a conversion on the channel and return the raw code.
    ///
    /// The returned value is always in `0..=ADC_MAX_READING`.
    fn read_channel(&mut self, channel: RangeChannel) -> u32;
}
