//! Right-side tracking PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::eqpt::ADC_NUM_CODES;
use serde::Serialize;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Range code the controller steers towards, half the ADC span.
pub const TARGET: f64 = (ADC_NUM_CODES / 2) as f64;

/// Divisor applied to the error for the proportional term.
const PROP_DIVISOR: f64 = 20.0;

/// Divisor applied to the integral term.
const INTEGRAL_DIVISOR: f64 = 10_000.0;

/// Gain of the derivative term.
///
/// Integer division, this is 1 not 1.5.
pub const DERIV_GAIN: f64 = (3 / 2) as f64;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Controller history, one instance per tracked side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PidCtrl {
    last_error: f64,
    integral: f64,
    output: f64,
}

/// Breakdown of a single update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidTerms {
    pub error: f64,
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
    pub signal: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidCtrl {
    pub fn new(initial_last_error: f64) -> Self {
        Self {
            last_error: initial_last_error,
            integral: 0.0,
            output: 0.0,
        }
    }

    /// Run one update and return the correction signal.
    ///
    /// Must be called exactly once per tick, the derivative is taken against
    /// the previous call.
    pub fn update(&mut self, right_range: u32) -> f64 {
        self.update_terms(right_range).signal
    }

    /// As [`PidCtrl::update`] but returning every term.
    pub fn update_terms(&mut self, right_range: u32) -> PidTerms {
        let error = right_range as f64 - TARGET;

        let proportional = error / PROP_DIVISOR;

        // Not accumulated, the instantaneous error is used each tick
        let integral = error;

        let derivative = (error - self.last_error) * DERIV_GAIN;

        let signal = proportional + integral / INTEGRAL_DIVISOR + derivative;

        self.last_error = error;
        self.integral = integral;
        self.output = signal;

        PidTerms {
            error,
            proportional,
            integral,
            derivative,
            signal,
        }
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Signal produced by the most recent update.
    pub fn output(&self) -> f64 {
        self.output
    }
}

impl Default for PidCtrl {
    fn default() -> Self {
        Self::new(super::Params::default().initial_last_error)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_target() {
        assert_eq!(TARGET, 2048.0);
        assert_eq!(DERIV_GAIN, 1.0);
    }

    #[test]
    fn test_first_tick() {
        let mut pid = PidCtrl::new(250.0);
        let terms = pid.update_terms(2600);

        assert_eq!(terms.error, 552.0);
        assert!((terms.proportional - 27.6).abs() < 1e-9);
        assert_eq!(terms.integral, 552.0);
        assert_eq!(terms.derivative, 302.0);
        assert!((terms.signal - 329.6552).abs() < 1e-9);

        assert_eq!(pid.last_error(), 552.0);
        assert_eq!(pid.output(), terms.signal);
    }

    #[test]
    fn test_on_target() {
        let mut pid = PidCtrl::new(0.0);
        assert_eq!(pid.update(2048), 0.0);
    }

    #[test]
    fn test_derivative_uses_previous_tick() {
        let mut pid = PidCtrl::new(0.0);
        pid.update(2148);
        let terms = pid.update_terms(2048);

        // Error went from 100 to 0
        assert_eq!(terms.derivative, -100.0);
        assert_eq!(terms.proportional, 0.0);
        assert_eq!(pid.last_error(), 0.0);
    }

    #[test]
    fn test_total_and_deterministic() {
        let mut a = PidCtrl::new(250.0);
        let mut b = PidCtrl::new(250.0);

        for code in 0..=4095u32 {
            let sa = a.update(code);
            let sb = b.update(code);
            assert!(sa.is_finite());
            assert_eq!(sa, sb);
        }

        // Codes beyond the ADC range are tolerated too
        assert!(a.update(u32::MAX).is_finite());
    }
}
