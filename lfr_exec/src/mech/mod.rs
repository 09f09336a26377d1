//! # Mechanisms module
//!
//! Drivers which turn the equipment interface commands into pin outputs. The drivers are generic
//! over the [`DigitalOut`] and [`PwmOut`] pin traits, so the same logic drives the Raspberry Pi's
//! GPIO pins on the rover and the simulated pins used on a development machine.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod hbridge;
mod params;
mod servo;
pub mod sim;

/// Raspberry Pi GPIO backend
#[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
pub mod rpi;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use hbridge::{HBridgeDrive, MotorChannel, WheelDir};
pub use params::*;
pub use servo::ServoHeading;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::EqptError;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A digital output pin.
pub trait DigitalOut {
    /// Drive the pin high (`true`) or low (`false`).
    fn set_level(&mut self, high: bool) -> Result<(), EqptError>;
}

/// A pulse width modulated output with a fixed frequency.
pub trait PwmOut {
    /// Set the duty cycle of the output.
    ///
    /// ## Arguments
    /// - `duty_pct` - The duty cycle as a percentage, 0 to 100. A duty of 0 idles the output.
    fn set_duty_cycle(&mut self, duty_pct: f64) -> Result<(), EqptError>;
}
