//! Maneuver to motor demand mapping

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use periph_if::eqpt::{pulse_width, Direction, Motor, MotorDriver};
use serde::Serialize;

use super::Maneuver;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Demand for one drive motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WheelDemand {
    pub dir: Direction,

    /// Units: percent of the PWM period
    pub duty_pct: u32,
}

/// Demands for both drive motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriveCommand {
    pub left: WheelDemand,
    pub right: WheelDemand,

    /// PWM period the percentages are scaled against.
    ///
    /// Units: generator ticks
    pub period_ticks: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WheelDemand {
    pub const fn fwd(duty_pct: u32) -> Self {
        Self {
            dir: Direction::Forward,
            duty_pct,
        }
    }

    pub const fn rev(duty_pct: u32) -> Self {
        Self {
            dir: Direction::Reverse,
            duty_pct,
        }
    }
}

impl DriveCommand {
    /// Get the motor demands for a maneuver.
    ///
    /// `NoChange` has no demands, `None` is returned and the motors keep
    /// whatever they were last given.
    pub fn for_mnvr(mnvr: Maneuver, period_ticks: u32) -> Option<Self> {
        let (left, right) = match mnvr {
            Maneuver::UTurn => (WheelDemand::rev(99), WheelDemand::fwd(99)),
            Maneuver::SlightLeft => (WheelDemand::fwd(70), WheelDemand::fwd(80)),
            Maneuver::SlightRight => (WheelDemand::fwd(80), WheelDemand::fwd(70)),
            Maneuver::SharpRight => (WheelDemand::fwd(99), WheelDemand::fwd(17)),
            Maneuver::Straight | Maneuver::StraightAlt => {
                (WheelDemand::fwd(80), WheelDemand::fwd(80))
            }
            Maneuver::NoChange => return None,
        };

        Some(Self {
            left,
            right,
            period_ticks,
        })
    }

    /// Write the command to the motor driver, directions first.
    pub fn apply(&self, motors: &mut dyn MotorDriver) {
        motors.set_direction(Motor::Left, self.left.dir);
        motors.set_direction(Motor::Right, self.right.dir);
        motors.set_duty_cycle(Motor::Left, self.left.duty_pct, self.period_ticks);
        motors.set_duty_cycle(Motor::Right, self.right.duty_pct, self.period_ticks);
    }

    /// Pulse widths the generator will be programmed with, `(left, right)`.
    pub fn pulse_widths(&self) -> (u32, u32) {
        (
            pulse_width(self.left.duty_pct, self.period_ticks),
            pulse_width(self.right.duty_pct, self.period_ticks),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use periph_if::sim::SimMotors;

    #[test]
    fn test_table() {
        let f = Direction::Forward;
        let r = Direction::Reverse;

        let expected = [
            (Maneuver::UTurn, (r, 99), (f, 99)),
            (Maneuver::SlightLeft, (f, 70), (f, 80)),
            (Maneuver::SlightRight, (f, 80), (f, 70)),
            (Maneuver::SharpRight, (f, 99), (f, 17)),
            (Maneuver::Straight, (f, 80), (f, 80)),
            (Maneuver::StraightAlt, (f, 80), (f, 80)),
        ];

        for (mnvr, l, rt) in expected.iter() {
            let cmd = DriveCommand::for_mnvr(*mnvr, 61).unwrap();
            assert_eq!((cmd.left.dir, cmd.left.duty_pct), *l, "{:?} left", mnvr);
            assert_eq!((cmd.right.dir, cmd.right.duty_pct), *rt, "{:?} right", mnvr);
            assert_eq!(cmd.period_ticks, 61);
        }

        assert_eq!(DriveCommand::for_mnvr(Maneuver::NoChange, 61), None);
    }

    #[test]
    fn test_apply() {
        let sim = SimMotors::new(61);
        let mut motors = sim.clone();

        DriveCommand::for_mnvr(Maneuver::SharpRight, 61)
            .unwrap()
            .apply(&mut motors);

        let regs = sim.regs();
        assert_eq!(regs.left_dir, Some(Direction::Forward));
        assert_eq!(regs.right_dir, Some(Direction::Forward));
        assert_eq!(regs.left_pulse, Some(60));
        assert_eq!(regs.right_pulse, Some(10));
        assert_eq!(regs.num_writes, 4);
    }

    #[test]
    fn test_pulse_widths() {
        let cmd = DriveCommand::for_mnvr(Maneuver::SlightLeft, 61).unwrap();
        assert_eq!(cmd.pulse_widths(), (42, 48));
    }
}
