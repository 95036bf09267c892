//! # Simulated equipment
//!
//! Every simulated item is a cheap handle onto shared state, so a test can
//! keep a clone to poke inputs and inspect registers after another clone has
//! been boxed into a [`crate::eqpt::Periphs`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod console;
mod motors;
mod params;
mod sensors;
mod timing;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use console::*;
pub use motors::*;
pub use params::*;
pub use sensors::*;
pub use timing::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::{Mutex, MutexGuard};

use crate::eqpt::Periphs;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Handles onto every simulated peripheral in a [`Periphs`] set.
#[derive(Clone, Default)]
pub struct SimHandles {
    pub adc: SimAdc,
    pub gpio: SimGpio,
    pub motors: SimMotors,
    pub delay: SimDelay,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimHandles {
    /// Build a simulated board from the sim parameters.
    pub fn from_params(params: &SimParams) -> Self {
        let handles = Self {
            adc: SimAdc::default(),
            gpio: SimGpio::default(),
            motors: SimMotors::new(params.pwm_period_ticks),
            delay: SimDelay::default(),
        };

        handles.adc.set(crate::eqpt::RangeChannel::Right, params.right_range);
        handles.adc.set(crate::eqpt::RangeChannel::Front, params.front_range);
        handles.gpio.set_discharge_reads(params.refl_discharge_reads);

        handles
    }

    /// Box clones of the handles into a peripheral set.
    pub fn periphs(&self) -> Periphs {
        Periphs {
            adc: Box::new(self.adc.clone()),
            gpio: Box::new(self.gpio.clone()),
            motors: Box::new(self.motors.clone()),
            delay: Box::new(self.delay.clone()),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Lock shared sim state, recovering the data if another holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
