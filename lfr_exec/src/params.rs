//! # Line Follower Executable Parameters
//!
//! This module provides parameters for the line follower executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cam::CamParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LfrExecParams {
    /// Which equipment to run against
    pub backend: Backend,

    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Minimum level of log records to output, one of `info`, `debug` or `trace`.
    pub log_level: String,

    /// If true the log is also written to a file in a new session directory.
    #[serde(default)]
    pub log_to_file: bool,

    /// Camera used by the hardware backend
    #[serde(default)]
    pub cam: CamParams,

    /// Synthetic scene used by the sim backend
    #[serde(default)]
    pub sim: SimParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Horizontal position of the line in the synthetic frames, leave unset for no line.
    ///
    /// Units: pixels
    pub line_x_px: Option<i32>,

    /// Units: pixels
    pub line_width_px: u32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Raspberry Pi GPIO pins and a V4L2 camera
    Hardware,

    /// Simulated pins and a synthetic camera
    Sim,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for LfrExecParams {
    fn default() -> Self {
        Self {
            backend: Backend::Sim,
            cycle_period_s: 0.05,
            log_level: String::from("info"),
            log_to_file: false,
            cam: CamParams::default(),
            sim: SimParams::default(),
        }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            line_x_px: Some(320),
            line_width_px: 60,
        }
    }
}

impl LfrExecParams {
    /// The configured log level, or `None` if it isn't a recognised level name.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        self.log_level.parse().ok()
    }

    /// The cycle period, or `None` if it isn't a positive finite number of seconds.
    pub fn cycle_period(&self) -> Option<Duration> {
        if self.cycle_period_s.is_finite() && self.cycle_period_s > 0.0 {
            Some(Duration::from_secs_f64(self.cycle_period_s))
        } else {
            None
        }
    }
}
