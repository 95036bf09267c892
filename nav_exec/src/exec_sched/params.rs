//! Parameters structure for the execution scheduler

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::ManualParams;
use crate::refl_sampler::ReflParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Period of the control timer.
    ///
    /// Units: milliseconds
    pub ctrl_period_ms: u64,

    /// Pause between diagnostic ticks.
    ///
    /// Units: milliseconds
    pub diag_period_ms: u32,

    /// Hold after actuating a SharpRight in the control path.
    ///
    /// Units: microseconds
    pub sharp_right_hold_us: u32,

    /// Pause between reflectance test samples.
    ///
    /// Units: microseconds
    pub refl_test_period_us: u32,

    pub refl: ReflParams,

    pub manual: ManualParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ctrl_period_ms: 10,
            diag_period_ms: 50,
            sharp_right_hold_us: 38,
            refl_test_period_us: 375,
            refl: ReflParams::default(),
            manual: ManualParams::default(),
        }
    }
}
