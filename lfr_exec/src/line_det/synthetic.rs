//! Synthetic ground frames
//!
//! Used by the simulated camera and for exercising the detector without a camera.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::Frame;
use image::Rgb;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Colour of the floor, a light gray well above the line brightness threshold.
pub const FLOOR_RGB: [u8; 3] = [210, 205, 200];

/// Colour of the line, close to black.
pub const LINE_RGB: [u8; 3] = [25, 25, 30];

/// Fraction of the frame height left as floor above and below a synthetic bar.
const BAR_MARGIN_FRAC: u32 = 10;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// A frame showing only the floor.
pub fn blank_frame(width: u32, height: u32) -> Frame {
    Frame::from_pixel(width, height, Rgb(FLOOR_RGB))
}

/// A frame showing a vertical dark bar of `bar_width` pixels centered on column `center_x`.
///
/// The bar leaves a margin of a tenth of the frame height above and below it. Parts of the bar
/// falling outside the frame are clipped.
pub fn vertical_bar_frame(width: u32, height: u32, center_x: i32, bar_width: u32) -> Frame {
    let mut frame = blank_frame(width, height);

    let x_start = center_x - (bar_width / 2) as i32;
    let x_end = x_start + bar_width as i32;
    let margin = height / BAR_MARGIN_FRAC;

    for y in margin..(height - margin) {
        for x in x_start.max(0)..x_end.min(width as i32) {
            frame.put_pixel(x as u32, y, Rgb(LINE_RGB));
        }
    }

    frame
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bar_columns() {
        let frame = vertical_bar_frame(100, 50, 50, 11);

        assert_eq!(frame.get_pixel(44, 25).0, FLOOR_RGB);
        assert_eq!(frame.get_pixel(45, 25).0, LINE_RGB);
        assert_eq!(frame.get_pixel(55, 25).0, LINE_RGB);
        assert_eq!(frame.get_pixel(56, 25).0, FLOOR_RGB);

        // Margins stay floor
        assert_eq!(frame.get_pixel(50, 0).0, FLOOR_RGB);
        assert_eq!(frame.get_pixel(50, 49).0, FLOOR_RGB);
    }

    #[test]
    fn test_bar_clipped() {
        let frame = vertical_bar_frame(100, 50, -2, 11);

        assert_eq!(frame.get_pixel(0, 25).0, LINE_RGB);
        assert_eq!(frame.get_pixel(3, 25).0, LINE_RGB);
        assert_eq!(frame.get_pixel(4, 25).0, FLOOR_RGB);
    }
}
