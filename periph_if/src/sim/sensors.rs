//! Simulated range sensors and digital lines

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::eqpt::{AnalogIn, DigitalIo, PinId, PinMode, RangeChannel, ADC_MAX_READING};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated ADC returning operator-set codes.
#[derive(Clone, Default)]
pub struct SimAdc {
    state: Arc<Mutex<HashMap<RangeChannel, u32>>>,
}

/// Simulated digital lines with an RC-style discharge on input.
///
/// After a line is switched to input it reads high for the configured number
/// of reads, then low.
#[derive(Clone, Default)]
pub struct SimGpio {
    state: Arc<Mutex<GpioState>>,
}

#[derive(Default)]
struct GpioState {
    modes: HashMap<PinId, PinMode>,
    levels: HashMap<PinId, bool>,
    discharge_reads: Option<u32>,
    remaining: HashMap<PinId, u32>,
    num_reads: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimAdc {
    /// Set the code returned for a channel, saturating at the ADC maximum.
    pub fn set(&self, channel: RangeChannel, code: u32) {
        lock(&self.state).insert(channel, code.min(ADC_MAX_READING));
    }
}

impl AnalogIn for SimAdc {
    fn read_channel(&mut self, channel: RangeChannel) -> u32 {
        lock(&self.state).get(&channel).copied().unwrap_or(0)
    }
}

impl SimGpio {
    /// Set how many high reads a charged line gives before discharging.
    pub fn set_discharge_reads(&self, reads: Option<u32>) {
        lock(&self.state).discharge_reads = reads;
    }

    /// Current mode of a line, `None` if it has never been configured.
    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        lock(&self.state).modes.get(&pin).copied()
    }

    /// Last level written to a line.
    pub fn level(&self, pin: PinId) -> Option<bool> {
        lock(&self.state).levels.get(&pin).copied()
    }

    /// Total number of reads across all lines.
    pub fn num_reads(&self) -> u64 {
        lock(&self.state).num_reads
    }
}

impl DigitalIo for SimGpio {
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) {
        let mut s = lock(&self.state);

        if mode == PinMode::Input {
            let charged = s.levels.get(&pin).copied().unwrap_or(false);
            let reads = if charged {
                s.discharge_reads.unwrap_or(u32::MAX)
            } else {
                0
            };
            s.remaining.insert(pin, reads);
        }

        s.modes.insert(pin, mode);
    }

    fn write_pin(&mut self, pin: PinId, high: bool) {
        lock(&self.state).levels.insert(pin, high);
    }

    fn read_pin(&mut self, pin: PinId) -> bool {
        let mut s = lock(&self.state);
        s.num_reads += 1;

        match s.modes.get(&pin) {
            Some(PinMode::Input) => (),
            _ => return s.levels.get(&pin).copied().unwrap_or(false),
        }

        // A line that never discharges stays high forever
        if s.discharge_reads.is_none() && s.levels.get(&pin).copied().unwrap_or(false) {
            return true;
        }

        match s.remaining.get_mut(&pin) {
            Some(r) if *r > 0 => {
                *r -= 1;
                true
            }
            _ => {
                s.levels.insert(pin, false);
                false
            }
        }
    }
}
