//! # Operator command module
//!
//! The textual vocabulary typed into the console. Two-letter tokens select a
//! mode from the top menu, single digits drive the motors in manual mode.
//! Matching is exact and case-sensitive.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A top menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCmd {
    /// `DS` - run the distance sensor test (diagnostic loop)
    DistanceTest,
    /// `LS` - run the light sensor test
    LightTest,
    /// `MS` - drive the motors by hand
    MotorTest,
    /// `PD` - start timer driven PID control
    PidControl,
}

/// A manual motor command, only valid inside the motor test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualCmd {
    /// `1`
    Stop,
    /// `2`
    Reverse,
    /// `3`
    Forward,
    /// `4`
    SpeedUp,
    /// `5`
    SlowDown,
    /// `6`
    TurnRight,
    /// `7`
    TurnLeft,
}

/// Possible parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CmdParseError {
    #[error("\"{0}\" is not a recognised menu command")]
    UnknownMenuCmd(String),

    #[error("\"{0}\" is not a recognised motor command")]
    UnknownManualCmd(String),
}

// ---------------------------------------------------------------------------
// COMMAND TABLES
// ---------------------------------------------------------------------------

impl MenuCmd {
    /// All menu commands, in the order they are listed to the operator.
    pub const ALL: [MenuCmd; 4] = [
        MenuCmd::DistanceTest,
        MenuCmd::LightTest,
        MenuCmd::MotorTest,
        MenuCmd::PidControl,
    ];

    /// The token the operator types for this command.
    pub fn token(&self) -> &'static str {
        match self {
            MenuCmd::DistanceTest => "DS",
            MenuCmd::LightTest => "LS",
            MenuCmd::MotorTest => "MS",
            MenuCmd::PidControl => "PD",
        }
    }

    /// One line description shown in the menu.
    pub fn description(&self) -> &'static str {
        match self {
            MenuCmd::DistanceTest => "run distance sensor test",
            MenuCmd::LightTest => "run light sensor test",
            MenuCmd::MotorTest => "test motors",
            MenuCmd::PidControl => "PID test",
        }
    }
}

impl ManualCmd {
    pub const ALL: [ManualCmd; 7] = [
        ManualCmd::Stop,
        ManualCmd::Reverse,
        ManualCmd::Forward,
        ManualCmd::SpeedUp,
        ManualCmd::SlowDown,
        ManualCmd::TurnRight,
        ManualCmd::TurnLeft,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            ManualCmd::Stop => "1",
            ManualCmd::Reverse => "2",
            ManualCmd::Forward => "3",
            ManualCmd::SpeedUp => "4",
            ManualCmd::SlowDown => "5",
            ManualCmd::TurnRight => "6",
            ManualCmd::TurnLeft => "7",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ManualCmd::Stop => "Stop",
            ManualCmd::Reverse => "Reverse",
            ManualCmd::Forward => "Forward",
            ManualCmd::SpeedUp => "Speed Up",
            ManualCmd::SlowDown => "Slow Down",
            ManualCmd::TurnRight => "Turn Right",
            ManualCmd::TurnLeft => "Turn Left",
        }
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FromStr for MenuCmd {
    type Err = CmdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuCmd::ALL
            .iter()
            .copied()
            .find(|c| c.token() == s)
            .ok_or_else(|| CmdParseError::UnknownMenuCmd(s.to_string()))
    }
}

impl FromStr for ManualCmd {
    type Err = CmdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ManualCmd::ALL
            .iter()
            .copied()
            .find(|c| c.token() == s)
            .ok_or_else(|| CmdParseError::UnknownManualCmd(s.to_string()))
    }
}

impl fmt::Display for MenuCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.token(), self.description())
    }
}

impl fmt::Display for ManualCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{} - {}", self.token(), self.description())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_menu_parse() {
        assert_eq!("DS".parse::<MenuCmd>(), Ok(MenuCmd::DistanceTest));
        assert_eq!("LS".parse::<MenuCmd>(), Ok(MenuCmd::LightTest));
        assert_eq!("MS".parse::<MenuCmd>(), Ok(MenuCmd::MotorTest));
        assert_eq!("PD".parse::<MenuCmd>(), Ok(MenuCmd::PidControl));

        // Case-sensitive, exact
        assert!("pd".parse::<MenuCmd>().is_err());
        assert!("PD ".parse::<MenuCmd>().is_err());
        assert!("PDX".parse::<MenuCmd>().is_err());
        assert_eq!(
            "XY".parse::<MenuCmd>(),
            Err(CmdParseError::UnknownMenuCmd("XY".into()))
        );
        assert!("".parse::<MenuCmd>().is_err());
    }

    #[test]
    fn test_manual_parse() {
        for (i, cmd) in ManualCmd::ALL.iter().enumerate() {
            assert_eq!((i + 1).to_string().parse::<ManualCmd>(), Ok(*cmd));
        }

        assert!("0".parse::<ManualCmd>().is_err());
        assert!("8".parse::<ManualCmd>().is_err());
        assert!("01".parse::<ManualCmd>().is_err());
        assert!("DS".parse::<ManualCmd>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MenuCmd::PidControl.to_string(), "PD - PID test");
        assert_eq!(ManualCmd::TurnLeft.to_string(), "07 - Turn Left");
    }
}
