//! HSV colour space conversion and thresholding
//!
//! Follows the 8-bit convention used by most vision tooling: hue is halved to fit the 0-180
//! range, saturation and value are scaled to 0-255.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::Frame;
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Value of a mask pixel which passed the threshold.
pub const MASK_ON: u8 = 255;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An inclusive range of HSV values, stored as `[h, s, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HsvRange {
    /// Returns true if every channel of `hsv` lies inside the range.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }

    /// Build a binary mask of the frame's pixels whose HSV value lies inside the range.
    pub fn threshold(&self, frame: &Frame) -> GrayImage {
        GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
            let p = frame.get_pixel(x, y).0;
            if self.contains(rgb_to_hsv(p)) {
                Luma([MASK_ON])
            } else {
                Luma([0])
            }
        })
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Convert an RGB pixel into HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = [rgb[0] as f64, rgb[1] as f64, rgb[2] as f64];

    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v > 0.0 { diff * 255.0 / v } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    // A hue which rounds up to 180 wraps back onto red
    let h = (h / 2.0).round() % 180.0;

    [h as u8, s.round() as u8, v as u8]
}
