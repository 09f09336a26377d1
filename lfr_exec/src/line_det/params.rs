//! Parameters structure for LineDet

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HsvRange;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for line detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDetParams {

    /// Inclusive HSV range of pixels belonging to the line.
    ///
    /// Hue is given in the 0-180 range, saturation and value in 0-255. The default covers every
    /// hue and saturation so only the brightness is thresholded, accepting black and dark gray.
    pub line_hsv_range: HsvRange,

    /// Side length of the square neighbourhood used by the morphological opening. Must be odd.
    ///
    /// Units: pixels
    pub kernel_size: u32,

    /// Contours enclosing an area less than or equal to this are rejected as noise.
    ///
    /// Units: pixels^2
    pub min_contour_area_px2: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("The kernel size must be odd and at least 1, found {0}")]
    InvalidKernelSize(u32),

    #[error("The HSV range has a lower bound above its upper bound: {0:?}")]
    InvalidHsvRange(HsvRange),

    #[error("The minimum contour area must be positive and finite, found {0}")]
    InvalidMinArea(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LineDetParams {
    fn default() -> Self {
        Self {
            line_hsv_range: HsvRange {
                lower: [0, 0, 0],
                upper: [180, 255, 120],
            },
            kernel_size: 5,
            min_contour_area_px2: 1000.0,
        }
    }
}

impl LineDetParams {
    /// Check that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 || self.kernel_size > 511 {
            return Err(ParamsError::InvalidKernelSize(self.kernel_size))
        }

        let range = &self.line_hsv_range;
        if range.lower.iter().zip(range.upper.iter()).any(|(l, u)| l > u) {
            return Err(ParamsError::InvalidHsvRange(*range))
        }

        if !self.min_contour_area_px2.is_finite() || self.min_contour_area_px2 < 0.0 {
            return Err(ParamsError::InvalidMinArea(self.min_contour_area_px2))
        }

        Ok(())
    }

    /// Radius of the opening neighbourhood, as used by the chessboard (L-infinity) norm.
    pub fn kernel_radius(&self) -> u8 {
        (self.kernel_size / 2) as u8
    }
}
