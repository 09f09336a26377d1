//! # Camera Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use image::RgbImage;

use crate::EqptError;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// A single colour frame from the ground facing camera.
pub type Frame = RgbImage;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of camera frames.
pub trait FrameSource {
    /// Capture the most recent frame.
    ///
    /// Failures (such as the device disconnecting) are not recoverable by the caller.
    fn capture(&mut self) -> Result<Frame, EqptError>;
}
