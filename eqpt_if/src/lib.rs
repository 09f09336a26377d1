//! # Equipment interface crate.
//!
//! Provides the interfaces between the line following software and the rover's equipment: the
//! camera which supplies frames, the drive motors and the camera heading servo. The control
//! software only ever speaks in terms of these interfaces, so the equipment behind them can be
//! the real hardware or a simulation.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Frame and frame source definitions
pub mod cam;

/// Drive demands and the drive actuator interface
pub mod drive;

/// Heading (camera servo) actuator interface
pub mod heading;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use cam::{Frame, FrameSource};
pub use drive::{DriveActuator, DriveDems, DriveIntent};
pub use heading::HeadingActuator;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can be raised by equipment.
#[derive(Debug, thiserror::Error)]
pub enum EqptError {
    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Could not decode the camera frame: {0}")]
    FrameDecode(String),

    #[error("Invalid drive demands: {0:?}")]
    InvalidDems(DriveDems),

    #[error("Invalid heading angle: {0} deg")]
    InvalidAngle(f64),
}
