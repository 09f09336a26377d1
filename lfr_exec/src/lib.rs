//! # Line follower library.
//!
//! This library allows the executables in this crate, and the benchmarks, to access the line
//! follower's modules.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Camera module - V4L2 and synthetic frame sources
pub mod cam;

/// Follow control module - keeps the rover on the line and recovers it when the line is lost
pub mod follow_ctrl;

/// Line detection module - finds the line's offset from center in a camera frame
pub mod line_det;

/// Mechanisms module - H-bridge drive and camera servo drivers
pub mod mech;

/// Odometry - wheel encoder pulse counting
pub mod odom;

/// Executable parameters
pub mod params;

#[cfg(test)]
pub(crate) mod test_utils;
