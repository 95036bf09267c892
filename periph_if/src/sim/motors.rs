//! Simulated motor driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::eqpt::{pulse_width, Direction, Motor, MotorDriver};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated motor driver which records the last value written to each
/// register.
#[derive(Clone)]
pub struct SimMotors {
    period_ticks: u32,
    regs: Arc<Mutex<MotorRegs>>,
}

/// Snapshot of the driver registers.
///
/// `None` means the register has never been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MotorRegs {
    pub left_dir: Option<Direction>,
    pub right_dir: Option<Direction>,

    /// Last duty percentage requested for each motor.
    pub left_pct: Option<u32>,
    pub right_pct: Option<u32>,

    /// Pulse width programmed into the generator.
    ///
    /// Units: generator ticks
    pub left_pulse: Option<u32>,
    pub right_pulse: Option<u32>,

    pub output_enabled: bool,

    /// Total number of direction and duty writes.
    pub num_writes: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMotors {
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period_ticks,
            regs: Arc::new(Mutex::new(MotorRegs::default())),
        }
    }

    pub fn regs(&self) -> MotorRegs {
        *lock(&self.regs)
    }
}

impl Default for SimMotors {
    fn default() -> Self {
        Self::new(super::SimParams::default().pwm_period_ticks)
    }
}

impl MotorDriver for SimMotors {
    fn set_direction(&mut self, motor: Motor, dir: Direction) {
        let mut r = lock(&self.regs);
        match motor {
            Motor::Left => r.left_dir = Some(dir),
            Motor::Right => r.right_dir = Some(dir),
        }
        r.num_writes += 1;
    }

    fn set_duty_cycle(&mut self, motor: Motor, percent: u32, period_ticks: u32) {
        let mut r = lock(&self.regs);
        let pulse = pulse_width(percent, period_ticks);
        match motor {
            Motor::Left => {
                r.left_pct = Some(percent);
                r.left_pulse = Some(pulse);
            }
            Motor::Right => {
                r.right_pct = Some(percent);
                r.right_pulse = Some(pulse);
            }
        }
        r.num_writes += 1;
    }

    fn set_output_enabled(&mut self, enabled: bool) {
        lock(&self.regs).output_enabled = enabled;
    }

    fn period_ticks(&self) -> u32 {
        self.period_ticks
    }
}
