//! Implementations for the LineDet state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::Frame;
use imageproc::{
    distance_transform::Norm,
    morphology::{dilate, erode},
    point::Point,
};
use log::trace;
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{
    contour::{external_contours, largest_contour},
    LineDetError, LineDetParams, LineObservation,
};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Line detection module state
#[derive(Debug, Default)]
pub struct LineDetector {
    pub(crate) params: LineDetParams,
}

/// Everything found while looking for the line in a frame.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// The observation passed on to control
    pub observation: LineObservation,

    /// Outline of the selected line contour, if one passed the area threshold
    #[serde(skip)]
    pub contour: Option<Vec<Point<i32>>>,

    /// Centroid of the selected line contour in pixel coordinates
    pub centroid_px: Option<(i32, i32)>,

    /// Status of the detection
    pub report: StatusReport,
}

/// Status report for LineDet processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// Number of outer contours found in the mask
    pub num_contours: usize,

    /// Area enclosed by the largest contour
    ///
    /// Units: pixels^2
    pub largest_area_px2: Option<f64>,

    /// Why the line was not found, if it wasn't
    pub rejection: Option<Rejection>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons for which no line is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// The mask contained no regions at all
    NoContours,

    /// The largest region was too small to be the line
    AreaTooSmall,

    /// The largest region's zeroth moment was zero, so it has no centroid
    ZeroMoment,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for LineDetector {
    type InitData = &'static str;
    type InitError = LineDetError;

    type InputData = Frame;
    type OutputData = LineObservation;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the LineDet module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: LineDetParams = params::load(init_data)?;
        params.validate()?;

        self.params = params;

        Ok(())
    }

    /// Find the line in the given frame.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let detection = self.detect(input_data);

        Ok((detection.observation, detection.report))
    }
}

impl LineDetector {

    /// Create a detector from already loaded parameters.
    pub fn new(params: LineDetParams) -> Result<Self, LineDetError> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &LineDetParams {
        &self.params
    }

    /// Look for the line in the frame.
    pub fn detect(&self, frame: &Frame) -> Detection {
        let mut report = StatusReport::default();

        // Dark pixels only
        let mask = self.params.line_hsv_range.threshold(frame);

        // Opening removes speckles smaller than the kernel while keeping the line's shape
        let radius = self.params.kernel_radius();
        let mask = dilate(&erode(&mask, Norm::LInf, radius), Norm::LInf, radius);

        let contours = external_contours(&mask);
        report.num_contours = contours.len();

        let (contour, moments) = match largest_contour(contours) {
            Some(c) => c,
            None => return Detection::rejected(report, Rejection::NoContours),
        };

        let area = moments.area();
        report.largest_area_px2 = Some(area);

        if area <= self.params.min_contour_area_px2 {
            return Detection::rejected(report, Rejection::AreaTooSmall)
        }

        let (cx, cy) = match moments.centroid() {
            Some((cx, cy)) => (cx as i32, cy as i32),
            None => {
                let mut det = Detection::rejected(report, Rejection::ZeroMoment);
                det.contour = Some(contour);
                return det
            }
        };

        let offset_px = cx - (frame.width() / 2) as i32;

        trace!(
            "Line found: centroid ({}, {}), offset {} px, area {:.0} px^2",
            cx, cy, offset_px, area
        );

        Detection {
            observation: LineObservation::found(offset_px),
            contour: Some(contour),
            centroid_px: Some((cx, cy)),
            report,
        }
    }
}

impl Detection {
    fn rejected(mut report: StatusReport, rejection: Rejection) -> Self {
        trace!("Line not found: {:?}", rejection);

        report.rejection = Some(rejection);

        Self {
            observation: LineObservation::not_found(),
            contour: None,
            centroid_px: None,
            report,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::line_det::synthetic::{blank_frame, vertical_bar_frame, FLOOR_RGB, LINE_RGB};
    use image::Rgb;

    const W: u32 = 640;
    const H: u32 = 480;

    fn detector() -> LineDetector {
        LineDetector::new(LineDetParams::default()).unwrap()
    }

    #[test]
    fn test_blank_frame_not_found() {
        let det = detector().detect(&blank_frame(W, H));

        assert_eq!(det.observation, LineObservation::not_found());
        assert_eq!(det.report.rejection, Some(Rejection::NoContours));
    }

    #[test]
    fn test_small_blob_not_found() {
        // 20x20 dark square survives the opening but encloses less than 1000 px^2
        let mut frame = blank_frame(W, H);
        for y in 200..220 {
            for x in 300..320 {
                frame.put_pixel(x, y, Rgb(LINE_RGB));
            }
        }

        let det = detector().detect(&frame);

        assert!(!det.observation.found);
        assert_eq!(det.observation.offset_px, 0);
        assert_eq!(det.report.rejection, Some(Rejection::AreaTooSmall));
        assert!(det.report.largest_area_px2.unwrap() <= 1000.0);
    }

    #[test]
    fn test_speckle_removed_by_opening() {
        // Isolated dark pixels scattered over the floor
        let mut frame = blank_frame(W, H);
        for i in 0..50 {
            frame.put_pixel(10 + i * 12, 20 + (i * 7) % 400, Rgb(LINE_RGB));
        }

        let det = detector().detect(&frame);

        assert!(!det.observation.found);
        assert_eq!(det.report.num_contours, 0);
    }

    #[test]
    fn test_centered_bar() {
        let det = detector().detect(&vertical_bar_frame(W, H, (W / 2) as i32, 41));

        assert!(det.observation.found);
        assert!(det.observation.offset_px.abs() <= 1);
        assert!(det.contour.is_some());
        assert_eq!(det.report.rejection, None);
    }

    #[test]
    fn test_offset_sign_and_monotonic() {
        let det = detector();
        let center = (W / 2) as i32;

        let mut last_offset = det
            .detect(&vertical_bar_frame(W, H, center, 41))
            .observation
            .offset_px;

        for d in [20, 60, 100, 150, 220].iter() {
            let right = det.detect(&vertical_bar_frame(W, H, center + d, 41)).observation;
            assert!(right.found);
            assert!(right.offset_px > last_offset);
            assert!((right.offset_px - d).abs() <= 1);
            last_offset = right.offset_px;

            let left = det.detect(&vertical_bar_frame(W, H, center - d, 41)).observation;
            assert!(left.found);
            assert!(left.offset_px < 0);
            assert!((left.offset_px + d).abs() <= 1);
        }
    }

    #[test]
    fn test_largest_region_wins() {
        // A thick bar on the left and a thin bar on the right
        let mut frame = vertical_bar_frame(W, H, 160, 61);
        for y in 100..380 {
            for x in 500..515 {
                frame.put_pixel(x, y, Rgb(LINE_RGB));
            }
        }

        let obs = detector().detect(&frame).observation;

        assert!(obs.found);
        assert!((obs.offset_px - (160 - 320)).abs() <= 1);
    }

    #[test]
    fn test_dark_gray_line_detected() {
        let mut frame = Frame::from_pixel(W, H, Rgb(FLOOR_RGB));
        for y in 50..430 {
            for x in 400..440 {
                frame.put_pixel(x, y, Rgb([100, 100, 100]));
            }
        }

        let obs = detector().detect(&frame).observation;

        assert!(obs.found);
        assert!(obs.offset_px > 0);
    }

    #[test]
    fn test_bar_touching_left_edge() {
        // Columns 0..=30
        let det = detector().detect(&vertical_bar_frame(W, H, 10, 41));

        assert!(det.observation.found);
        assert_eq!(det.report.num_contours, 1);
        assert!((det.observation.offset_px - (15 - 320)).abs() <= 1);
    }

    #[test]
    fn test_bar_touching_right_edge() {
        // Columns 620..=639
        let det = detector().detect(&vertical_bar_frame(W, H, W as i32 - 10, 41));

        assert!(det.observation.found);
        assert_eq!(det.report.num_contours, 1);
        assert!((det.observation.offset_px - (629 - 320)).abs() <= 1);
    }

    #[test]
    fn test_all_dark_frame() {
        let frame = Frame::from_pixel(W, H, Rgb(LINE_RGB));

        let det = detector().detect(&frame);

        assert!(det.observation.found);
        assert!(det.observation.offset_px.abs() <= 1);
        assert_eq!(det.report.num_contours, 1);
    }

    #[test]
    fn test_largest_region_at_edge_wins() {
        // A thick bar against the left edge and a thin bar in the middle
        let mut frame = vertical_bar_frame(W, H, 20, 41);
        for y in 100..380 {
            for x in 400..415 {
                frame.put_pixel(x, y, Rgb(LINE_RGB));
            }
        }

        let det = detector().detect(&frame);

        assert!(det.observation.found);
        assert_eq!(det.report.num_contours, 2);
        assert!(det.observation.offset_px < -250);
    }

    #[test]
    fn test_proc_matches_detect() {
        let mut det = detector();
        let frame = vertical_bar_frame(W, H, 400, 41);

        let (obs, report) = det.proc(&frame).unwrap();

        assert_eq!(obs, det.detect(&frame).observation);
        assert_eq!(report.num_contours, 1);
    }
}
