//! # Digital I/O

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Identifies a single digital line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinId(pub u8);

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Direction of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Output,
    Input,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Access to the board's digital lines.
pub trait DigitalIo {
    /// Switch the line between driving and sensing.
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode);

    /// Drive the line to the given level. Only meaningful in `PinMode::Output`.
    fn write_pin(&mut self, pin: PinId, high: bool);

    /// Read the level of the line.
    fn read_pin(&mut self, pin: PinId) -> bool;
}
