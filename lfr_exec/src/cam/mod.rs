//! # Camera module
//!
//! Frame sources for the line detector: a V4L2 camera on Linux hosts and a synthetic camera which
//! renders a line at a fixed position.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod synthetic_cam;

#[cfg(target_os = "linux")]
mod v4l_cam;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use synthetic_cam::SyntheticCam;

#[cfg(target_os = "linux")]
pub use v4l_cam::V4lCam;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamParams {
    /// Linux device path of the camera
    pub video_device: String,

    /// Width of captured frames in pixels
    pub frame_width: u32,

    /// Height of captured frames in pixels
    pub frame_height: u32,

    /// Capture rate of the camera
    pub frame_rate_hz: u32,

    /// Number of driver buffers the camera streams into.
    ///
    /// The driver keeps filling these between captures and hands them back oldest first, so a
    /// capture discards this many frames before returning the next one. Frames are only captured
    /// on demand, often seconds apart, and without this a capture would return a frame taken
    /// before the camera was last moved. Values below 1 are treated as 1.
    #[serde(default = "default_num_buffers")]
    pub num_buffers: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for CamParams {
    fn default() -> Self {
        Self {
            video_device: String::from("/dev/video0"),
            frame_width: 640,
            frame_height: 480,
            frame_rate_hz: 30,
            num_buffers: default_num_buffers(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_num_buffers() -> u32 {
    2
}

/// Pull `stale` items from `grab` and drop them, then return the next one.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn grab_latest<T, E, F>(stale: u32, mut grab: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
{
    for _ in 0..stale {
        grab()?;
    }

    grab()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_grab_latest_skips_queued() {
        let mut next = 0;
        let latest: Result<u32, ()> = grab_latest(2, || {
            next += 1;
            Ok(next)
        });

        assert_eq!(latest, Ok(3));
    }

    #[test]
    fn test_grab_latest_stops_on_error() {
        let mut calls = 0;
        let latest: Result<u32, &str> = grab_latest(2, || {
            calls += 1;
            Err("device gone")
        });

        assert_eq!(latest, Err("device gone"));
        assert_eq!(calls, 1);
    }
}
