//! # Navigation control module
//!
//! One control tick: the right range reading drives a PID controller, whose
//! signal is combined with the front range reading to pick a maneuver, which
//! is then mapped onto the two drive motors.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod classifier;
mod drive;
mod params;
mod pid;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use classifier::*;
pub use drive::*;
pub use params::*;
pub use pid::*;
pub use state::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::eqpt::{AnalogIn, RangeChannel};
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Raw range sensor codes sampled at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SensorSample {
    /// Side sensor, the tracked quantity.
    pub right_range: u32,

    /// Forward sensor, obstacle proximity.
    pub front_range: u32,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during NavCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Could not load the NavCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Could not create the NavCtrl archive directory: {0}")]
    ArchDirError(std::io::Error),

    #[error("Could not open the NavCtrl archive: {0}")]
    ArchiveError(util::archive::ArchiveError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SensorSample {
    /// Trigger a conversion on both range channels.
    pub fn read(adc: &mut dyn AnalogIn) -> Self {
        Self {
            right_range: adc.read_channel(RangeChannel::Right),
            front_range: adc.read_channel(RangeChannel::Front),
        }
    }
}
