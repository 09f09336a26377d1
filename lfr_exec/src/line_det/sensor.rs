//! Line sensor, pairing a frame source with the line detector

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{EqptError, FrameSource};

use super::{LineDetector, LineObservation};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Something which can produce a fresh observation of the line on demand.
pub trait LineSensor {
    /// Acquire a new frame and look for the line in it.
    fn observe(&mut self) -> Result<LineObservation, EqptError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A [`LineSensor`] which captures frames from a camera and runs them through a
/// [`LineDetector`].
///
/// Frames are dropped as soon as they have been processed.
pub struct CamLineSensor {
    source: Box<dyn FrameSource>,
    detector: LineDetector,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CamLineSensor {
    pub fn new(source: Box<dyn FrameSource>, detector: LineDetector) -> Self {
        Self { source, detector }
    }
}

impl LineSensor for CamLineSensor {
    fn observe(&mut self) -> Result<LineObservation, EqptError> {
        let frame = self.source.capture()?;

        Ok(self.detector.detect(&frame).observation)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::line_det::{synthetic, LineDetParams};
    use eqpt_if::Frame;

    struct OneBar;

    impl FrameSource for OneBar {
        fn capture(&mut self) -> Result<Frame, EqptError> {
            Ok(synthetic::vertical_bar_frame(640, 480, 500, 41))
        }
    }

    struct Unplugged;

    impl FrameSource for Unplugged {
        fn capture(&mut self) -> Result<Frame, EqptError> {
            Err(EqptError::Camera("device disconnected".into()))
        }
    }

    #[test]
    fn test_observe() {
        let detector = LineDetector::new(LineDetParams::default()).unwrap();
        let mut sensor = CamLineSensor::new(Box::new(OneBar), detector);

        let obs = sensor.observe().unwrap();
        assert!(obs.found);
        assert_eq!(obs.offset_px, 180);
    }

    #[test]
    fn test_capture_failure_propagates() {
        let detector = LineDetector::new(LineDetParams::default()).unwrap();
        let mut sensor = CamLineSensor::new(Box::new(Unplugged), detector);

        assert!(matches!(sensor.observe(), Err(EqptError::Camera(_))));
    }
}
