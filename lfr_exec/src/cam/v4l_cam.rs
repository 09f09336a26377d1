//! # V4L2 camera

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{EqptError, Frame, FrameSource};
use image::ImageFormat;
use log::debug;
use rscam::{Camera, Config};

use super::{grab_latest, CamParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A camera streaming MJPG frames, which are decoded into RGB on capture.
///
/// Each capture returns a frame exposed after the call was made, see [`CamParams::num_buffers`].
pub struct V4lCam {
    camera: Camera,
    num_buffers: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl V4lCam {
    /// Open the camera and start streaming.
    pub fn open(params: &CamParams) -> Result<Self, EqptError> {
        let num_buffers = params.num_buffers.max(1);

        let mut camera = Camera::new(&params.video_device).map_err(|e| {
            EqptError::Camera(format!("Could not open {}: {}", params.video_device, e))
        })?;

        camera
            .start(&Config {
                interval: (1, params.frame_rate_hz),
                resolution: (params.frame_width, params.frame_height),
                format: b"MJPG",
                nbuffers: num_buffers,
                ..Default::default()
            })
            .map_err(|e| EqptError::Camera(format!("Could not start streaming: {}", e)))?;

        debug!(
            "Streaming {}x{} from {}",
            params.frame_width, params.frame_height, params.video_device
        );

        Ok(Self {
            camera,
            num_buffers,
        })
    }
}

impl FrameSource for V4lCam {
    fn capture(&mut self) -> Result<Frame, EqptError> {
        let camera = &self.camera;

        // Each stale frame is dropped straight away, handing its buffer back to the driver
        let raw = grab_latest(self.num_buffers, || camera.capture())
            .map_err(|e| EqptError::Camera(format!("Could not capture frame: {}", e)))?;

        image::load_from_memory_with_format(&raw, ImageFormat::Jpeg)
            .map(|img| img.to_rgb8())
            .map_err(|e| EqptError::FrameDecode(e.to_string()))
    }
}
