//! Operator feedback drawing
//!
//! Draws the result of a detection over a copy of the frame. The annotated image is only for
//! display and has no effect on control.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::Frame;
use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use super::Detection;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const CENTERLINE_RGB: Rgb<u8> = Rgb([255, 0, 0]);
const CONTOUR_RGB: Rgb<u8> = Rgb([0, 255, 0]);
const CENTROID_RGB: Rgb<u8> = Rgb([0, 0, 255]);

/// Radius of the centroid marker.
///
/// Units: pixels
const CENTROID_RADIUS_PX: i32 = 5;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Draw the frame centerline, the line contour, the centroid, and a horizontal segment from the
/// centerline to the centroid, onto a copy of the frame.
pub fn annotate(frame: &Frame, detection: &Detection) -> Frame {
    let mut out = frame.clone();

    let center_x = (frame.width() / 2) as f32;
    let bottom = frame.height() as f32;

    // Two pixels wide so it stays visible on a scaled down display
    for dx in [0.0, 1.0].iter() {
        draw_line_segment_mut(
            &mut out,
            (center_x + dx, 0.0),
            (center_x + dx, bottom),
            CENTERLINE_RGB,
        );
    }

    if let Some(ref contour) = detection.contour {
        for (i, p0) in contour.iter().enumerate() {
            let p1 = &contour[(i + 1) % contour.len()];
            draw_line_segment_mut(
                &mut out,
                (p0.x as f32, p0.y as f32),
                (p1.x as f32, p1.y as f32),
                CONTOUR_RGB,
            );
        }
    }

    if let Some((cx, cy)) = detection.centroid_px {
        draw_filled_circle_mut(&mut out, (cx, cy), CENTROID_RADIUS_PX, CENTROID_RGB);

        // Offset from the centerline to the centroid
        draw_line_segment_mut(
            &mut out,
            (center_x, cy as f32),
            (cx as f32, cy as f32),
            CENTROID_RGB,
        );
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::line_det::{synthetic::vertical_bar_frame, LineDetParams, LineDetector};

    #[test]
    fn test_annotate_marks_centroid_and_centerline() {
        let frame = vertical_bar_frame(320, 240, 240, 21);
        let detection = LineDetector::new(LineDetParams::default())
            .unwrap()
            .detect(&frame);
        let (cx, cy) = detection.centroid_px.unwrap();

        let out = annotate(&frame, &detection);

        assert_eq!(out.dimensions(), frame.dimensions());
        assert_eq!(*out.get_pixel(cx as u32, cy as u32), CENTROID_RGB);
        assert_eq!(*out.get_pixel(160, 5), CENTERLINE_RGB);

        // The input frame is untouched
        assert_ne!(*frame.get_pixel(160, 5), CENTERLINE_RGB);
    }
}
