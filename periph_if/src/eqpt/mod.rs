//! # Equipment Interface
//!
//! This module defines the traits the controller core uses to reach the
//! board. Bring-up of the underlying peripherals (clocks, pin muxing, ADC
//! sequencers, PWM generators, UART) is the implementor's job.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod adc;
pub mod console;
pub mod delay;
pub mod gpio;
pub mod mot;
pub mod timer;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use adc::*;
pub use console::*;
pub use delay::*;
pub use gpio::*;
pub use mot::*;
pub use timer::*;

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// The set of peripherals the control paths read from and write to.
///
/// Everything in here is `Send` so the set can be handed to the timer
/// context as one unit.
pub struct Periphs {
    pub adc: Box<dyn AnalogIn + Send>,
    pub gpio: Box<dyn DigitalIo + Send>,
    pub motors: Box<dyn MotorDriver + Send>,
    pub delay: Box<dyn Delay + Send>,
}
