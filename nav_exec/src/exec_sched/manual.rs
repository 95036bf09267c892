//! Manual motor drive

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::{
    cmd::ManualCmd,
    eqpt::{Direction, Motor, MotorDriver},
};
use serde::Deserialize;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Highest speed the operator can request.
///
/// Units: percent
pub const MAX_SPEED_PCT: u32 = 100;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Speeds used by the manual motor test, all in percent of the PWM period.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualParams {
    /// Speed on entry and after a stop.
    pub initial_speed_pct: u32,

    /// Change applied by speed up and slow down.
    pub speed_step_pct: u32,

    /// Reduction of the inner wheel while turning.
    pub turn_offset_pct: u32,
}

/// Operator driven motor control, bypassing the controller.
#[derive(Debug, Clone)]
pub struct ManualDrive {
    params: ManualParams,
    speed_pct: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ManualParams {
    fn default() -> Self {
        Self {
            initial_speed_pct: 50,
            speed_step_pct: 25,
            turn_offset_pct: 25,
        }
    }
}

impl ManualDrive {
    pub fn new(params: ManualParams) -> Self {
        let speed_pct = clamp(params.initial_speed_pct, 0, MAX_SPEED_PCT);
        Self { params, speed_pct }
    }

    /// Current speed setting.
    ///
    /// Units: percent
    pub fn speed_pct(&self) -> u32 {
        self.speed_pct
    }

    /// Execute an operator command on the motors.
    pub fn apply(&mut self, cmd: ManualCmd, motors: &mut dyn MotorDriver) {
        let speed = self.speed_pct;

        match cmd {
            ManualCmd::Stop => {
                self.speed_pct = clamp(self.params.initial_speed_pct, 0, MAX_SPEED_PCT);
                set_duty(motors, 0, 0);
            }
            ManualCmd::Reverse => {
                set_dir(motors, Direction::Reverse);
                set_duty(motors, speed, speed);
            }
            ManualCmd::Forward => {
                set_dir(motors, Direction::Forward);
                set_duty(motors, speed, speed);
            }
            ManualCmd::SpeedUp => {
                self.speed_pct = clamp(
                    speed.saturating_add(self.params.speed_step_pct),
                    0,
                    MAX_SPEED_PCT,
                );
                set_duty(motors, self.speed_pct, self.speed_pct);
            }
            ManualCmd::SlowDown => {
                self.speed_pct = speed.saturating_sub(self.params.speed_step_pct);
                set_duty(motors, self.speed_pct, self.speed_pct);
            }
            ManualCmd::TurnRight => {
                set_duty(
                    motors,
                    speed,
                    speed.saturating_sub(self.params.turn_offset_pct),
                );
            }
            ManualCmd::TurnLeft => {
                set_duty(
                    motors,
                    speed.saturating_sub(self.params.turn_offset_pct),
                    speed,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn set_dir(motors: &mut dyn MotorDriver, dir: Direction) {
    motors.set_direction(Motor::Left, dir);
    motors.set_direction(Motor::Right, dir);
}

fn set_duty(motors: &mut dyn MotorDriver, left_pct: u32, right_pct: u32) {
    let period = motors.period_ticks();
    motors.set_duty_cycle(Motor::Left, left_pct, period);
    motors.set_duty_cycle(Motor::Right, right_pct, period);
}

#[cfg(test)]
mod test {
    use super::*;
    use periph_if::sim::SimMotors;

    #[test]
    fn test_speed_arithmetic() {
        let sim = SimMotors::new(10_000);
        let mut motors = sim.clone();
        let mut drive = ManualDrive::new(ManualParams::default());
        assert_eq!(drive.speed_pct(), 50);

        drive.apply(ManualCmd::Forward, &mut motors);
        let regs = sim.regs();
        assert_eq!(regs.left_dir, Some(Direction::Forward));
        assert_eq!(regs.left_pulse, Some(5_000));
        assert_eq!(regs.right_pulse, Some(5_000));

        drive.apply(ManualCmd::SpeedUp, &mut motors);
        assert_eq!(drive.speed_pct(), 75);
        assert_eq!(sim.regs().left_pct, Some(75));

        drive.apply(ManualCmd::TurnRight, &mut motors);
        let regs = sim.regs();
        assert_eq!((regs.left_pct, regs.right_pct), (Some(75), Some(50)));

        drive.apply(ManualCmd::TurnLeft, &mut motors);
        let regs = sim.regs();
        assert_eq!((regs.left_pct, regs.right_pct), (Some(50), Some(75)));

        drive.apply(ManualCmd::Reverse, &mut motors);
        assert_eq!(sim.regs().right_dir, Some(Direction::Reverse));

        drive.apply(ManualCmd::Stop, &mut motors);
        let regs = sim.regs();
        assert_eq!((regs.left_pct, regs.right_pct), (Some(0), Some(0)));
        assert_eq!(drive.speed_pct(), 50);
    }

    #[test]
    fn test_speed_saturates() {
        let mut motors = SimMotors::new(61);
        let mut drive = ManualDrive::new(ManualParams::default());

        for _ in 0..5 {
            drive.apply(ManualCmd::SpeedUp, &mut motors);
        }
        assert_eq!(drive.speed_pct(), MAX_SPEED_PCT);

        for _ in 0..10 {
            drive.apply(ManualCmd::SlowDown, &mut motors);
        }
        assert_eq!(drive.speed_pct(), 0);

        // Inner wheel never goes below zero
        drive.apply(ManualCmd::TurnLeft, &mut motors);
        assert_eq!(motors.regs().left_pct, Some(0));
    }
}
