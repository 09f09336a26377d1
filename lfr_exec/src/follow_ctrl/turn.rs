//! # Turn geometry
//!
//! Maps the camera heading at which the line was found onto the pivot which brings the rover's
//! body into line with it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{heading::CENTER_HEADING_DEG, DriveDems};
use serde::Serialize;
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A pivot to perform, if any, and how long to hold it for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnPlan {
    /// Direction of the pivot. `None` if the line was found straight ahead.
    pub direction: Option<PivotDir>,

    /// How long to hold the pivot for. Zero when there is no pivot.
    pub duration: Duration,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PivotDir {
    Left,
    Right,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TurnPlan {
    /// Compute the turn for a line detected at `heading_deg`.
    ///
    /// Headings above center are to the left, below center to the right. The pivot is held for
    /// the heading error divided by `turn_rate_deg_s`.
    pub fn from_heading(heading_deg: f64, turn_rate_deg_s: f64) -> Self {
        let error_deg = heading_deg - CENTER_HEADING_DEG;

        let direction = if error_deg > 0.0 {
            Some(PivotDir::Left)
        } else if error_deg < 0.0 {
            Some(PivotDir::Right)
        } else {
            None
        };

        let duration = match direction {
            Some(_) => Duration::from_secs_f64(error_deg.abs() / turn_rate_deg_s),
            None => Duration::from_secs(0),
        };

        Self {
            direction,
            duration,
        }
    }
}

impl PivotDir {
    /// Drive demands for a pivot in this direction.
    pub fn dems(self, speed_pct: f64) -> DriveDems {
        match self {
            PivotDir::Left => DriveDems::pivot_left(speed_pct),
            PivotDir::Right => DriveDems::pivot_right(speed_pct),
        }
    }
}
