//! # Heading Equipment Interface
//!
//! The heading actuator aims the camera. Angles are given in degrees between 0 and 180, where 90
//! looks straight ahead, angles below 90 look to the right and angles above 90 look to the left.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::EqptError;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Minimum heading angle.
pub const MIN_HEADING_DEG: f64 = 0.0;

/// Maximum heading angle.
pub const MAX_HEADING_DEG: f64 = 180.0;

/// Heading which looks straight ahead.
pub const CENTER_HEADING_DEG: f64 = 90.0;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// An actuator which can aim the camera.
pub trait HeadingActuator {
    /// Move to the given angle and settle there.
    ///
    /// Angles outside `[MIN_HEADING_DEG, MAX_HEADING_DEG]` are limited to that range. The
    /// actuator may be left idle once it has settled. Waiting for the actuator to settle may be
    /// cut short by a stop request.
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), EqptError>;

    /// As [`HeadingActuator::set_angle`], but always waits for the actuator to settle, even once
    /// a stop has been requested.
    fn set_angle_blocking(&mut self, angle_deg: f64) -> Result<(), EqptError> {
        self.set_angle(angle_deg)
    }
}
