//! # Line Detection module
//!
//! Estimates the lateral offset of a dark line from the vertical centerline of a ground facing
//! camera frame. The processing chain is:
//!
//! 1. Convert the frame to HSV so the threshold is robust to illumination changes.
//! 2. Threshold the HSV frame into a binary mask of dark pixels.
//! 3. Apply a morphological opening (one erosion, one dilation) to remove speckle noise.
//! 4. Extract the outer contours of the mask and select the one enclosing the largest area.
//! 5. Compute the centroid of that contour from its area moments.
//!
//! Degenerate cases (no contour, a contour which is too small, a zero area moment) are not
//! errors, they are reported as the line not being found.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod annotate;
mod contour;
mod hsv;
mod params;
mod sensor;
mod state;
pub mod synthetic;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use annotate::annotate;
pub use contour::PolygonMoments;
pub use hsv::{rgb_to_hsv, HsvRange};
pub use params::*;
pub use sensor::*;
pub use state::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The result of looking for the line in a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineObservation {
    /// Horizontal distance from the frame's vertical centerline to the centroid of the line.
    /// Positive when the line is to the right of center. Zero if the line wasn't found.
    ///
    /// Units: pixels
    pub offset_px: i32,

    /// True if a line was found in the frame.
    pub found: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible errors that can occur while setting up line detection.
#[derive(Debug, thiserror::Error)]
pub enum LineDetError {
    #[error("Failed to load LineDet parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("LineDet parameters are invalid: {0}")]
    ParamsInvalid(ParamsError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LineObservation {
    /// An observation in which the line was found at the given offset.
    pub fn found(offset_px: i32) -> Self {
        Self {
            offset_px,
            found: true,
        }
    }

    /// An observation in which no line was found.
    pub fn not_found() -> Self {
        Self {
            offset_px: 0,
            found: false,
        }
    }
}

impl From<util::params::LoadError> for LineDetError {
    fn from(e: util::params::LoadError) -> Self {
        LineDetError::ParamLoadError(e)
    }
}

impl From<ParamsError> for LineDetError {
    fn from(e: ParamsError) -> Self {
        LineDetError::ParamsInvalid(e)
    }
}
