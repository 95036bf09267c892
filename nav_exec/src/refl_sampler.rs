//! # Reflectance sampler
//!
//! The reflectance sensor is an RC circuit on a single digital line. The line
//! is charged as an output, switched to an input, and the number of polls
//! until it reads low is the measurement. Dark surfaces discharge slower and
//! give larger counts.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::eqpt::{Delay, DigitalIo, PinId, PinMode};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Counts at or above this are a dark surface.
pub const DEFAULT_DARK_THRESHOLD: u32 = 2000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the reflectance sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct ReflParams {
    /// Digital line the sensor is attached to.
    pub pin: u8,

    /// Time the line is driven high before sampling.
    ///
    /// Units: microseconds
    pub charge_pulse_us: u32,

    /// Poll count at which the measurement is abandoned.
    pub timeout_count: u32,

    /// Counts at or above this are a dark surface.
    pub dark_threshold: u32,
}

/// A one-shot reflectance measurement primitive.
#[derive(Debug, Clone)]
pub struct ReflSampler {
    params: ReflParams,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReflReading {
    /// Number of polls before the line discharged.
    Count(u32),

    /// The line did not discharge within the timeout.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Surface {
    Light,
    Dark,
    Unknown,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ReflParams {
    fn default() -> Self {
        Self {
            pin: 4,
            charge_pulse_us: 8,
            timeout_count: 100_000,
            dark_threshold: DEFAULT_DARK_THRESHOLD,
        }
    }
}

impl ReflSampler {
    pub fn new(params: ReflParams) -> Self {
        Self { params }
    }

    /// Charge the line and count polls until it discharges.
    pub fn sample(&self, gpio: &mut dyn DigitalIo, delay: &mut dyn Delay) -> ReflReading {
        let pin = PinId(self.params.pin);

        gpio.set_pin_mode(pin, PinMode::Output);
        gpio.write_pin(pin, true);
        delay.delay_us(self.params.charge_pulse_us);
        gpio.set_pin_mode(pin, PinMode::Input);

        let mut count = 0u32;
        while gpio.read_pin(pin) {
            count += 1;
            if count >= self.params.timeout_count {
                return ReflReading::TimedOut;
            }
        }

        ReflReading::Count(count)
    }

    pub fn classify(&self, reading: ReflReading) -> Surface {
        match reading {
            ReflReading::Count(n) if n < self.params.dark_threshold => Surface::Light,
            ReflReading::Count(_) => Surface::Dark,
            ReflReading::TimedOut => Surface::Unknown,
        }
    }
}

impl fmt::Display for ReflReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflReading::Count(n) => write!(f, "{}", n),
            ReflReading::TimedOut => write!(f, "timeout"),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Surface::Light => "white",
            Surface::Dark => "black",
            Surface::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use periph_if::sim::{SimDelay, SimGpio};

    fn sampler() -> ReflSampler {
        ReflSampler::new(ReflParams::default())
    }

    #[test]
    fn test_classify() {
        let s = sampler();
        assert_eq!(s.classify(ReflReading::Count(1500)), Surface::Light);
        assert_eq!(s.classify(ReflReading::Count(2500)), Surface::Dark);
        assert_eq!(s.classify(ReflReading::Count(1999)), Surface::Light);
        assert_eq!(s.classify(ReflReading::Count(2000)), Surface::Dark);
        assert_eq!(s.classify(ReflReading::TimedOut), Surface::Unknown);
    }

    #[test]
    fn test_sample_counts_discharge() {
        let gpio = SimGpio::default();
        gpio.set_discharge_reads(Some(1500));
        let delay = SimDelay::default();

        let reading = sampler().sample(&mut gpio.clone(), &mut delay.clone());

        assert_eq!(reading, ReflReading::Count(1500));
        assert_eq!(gpio.mode(PinId(4)), Some(PinMode::Input));
        assert_eq!(delay.calls(), vec![8]);
    }

    #[test]
    fn test_sample_times_out() {
        let gpio = SimGpio::default();
        gpio.set_discharge_reads(None);

        let s = ReflSampler::new(ReflParams {
            timeout_count: 1000,
            ..Default::default()
        });
        let reading = s.sample(&mut gpio.clone(), &mut SimDelay::default());

        assert_eq!(reading, ReflReading::TimedOut);
        assert_eq!(s.classify(reading), Surface::Unknown);
        assert_eq!(gpio.num_reads(), 1000);
    }

    #[test]
    fn test_display() {
        assert_eq!(ReflReading::Count(12).to_string(), "12");
        assert_eq!(ReflReading::TimedOut.to_string(), "timeout");
        assert_eq!(Surface::Light.to_string(), "white");
        assert_eq!(Surface::Dark.to_string(), "black");
    }
}
