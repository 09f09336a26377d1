//! # FollowCtrl Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{
    drive::MAX_SPEED_PCT,
    heading::{MAX_HEADING_DEG, MIN_HEADING_DEG},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use util::maths::in_range;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the line following controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowCtrlParams {
    /// Offset magnitude above which the rover pivots towards the line instead of driving
    /// straight.
    ///
    /// Units: pixels
    pub turn_threshold_px: i32,

    /// Speed used to drive forward along the line.
    ///
    /// Units: percent of maximum drive output
    pub base_speed_pct: f64,

    /// Speed used for all pivots.
    ///
    /// Units: percent of maximum drive output
    pub turn_speed_pct: f64,

    /// Speed used to reverse once the line is lost.
    ///
    /// Units: percent of maximum drive output
    pub recovery_speed_pct: f64,

    /// How long to reverse for before scanning.
    ///
    /// Units: seconds
    pub reverse_duration_s: f64,

    /// How long to wait after aiming the camera at a probe heading before looking for the line.
    ///
    /// Units: seconds
    pub scan_dwell_s: f64,

    /// Camera headings to try, in order, while scanning for a lost line.
    ///
    /// Units: degrees, 90 is straight ahead, below 90 is right, above 90 is left
    pub scan_headings_deg: Vec<f64>,

    /// Heading change achieved by one second of pivoting at the turn speed.
    ///
    /// Units: degrees/second
    pub turn_rate_deg_s: f64,

    /// Number of consecutive scans which may fail to find the line before giving up. If not set
    /// the rover keeps reversing and scanning until it is stopped.
    #[serde(default)]
    pub max_recovery_cycles: Option<u32>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Speed `{0}` must be between 0 and 100 %, found {1}")]
    InvalidSpeed(&'static str, f64),

    #[error("Duration `{0}` must be finite and not negative, found {1} s")]
    InvalidDuration(&'static str, f64),

    #[error("The turn threshold must not be negative, found {0} px")]
    InvalidTurnThreshold(i32),

    #[error("The turn rate must be positive and finite, found {0} deg/s")]
    InvalidTurnRate(f64),

    #[error("The scan plan must contain at least one heading")]
    EmptyScanPlan,

    #[error("Scan heading {0} deg lies outside 0 to 180 deg")]
    InvalidScanHeading(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for FollowCtrlParams {
    fn default() -> Self {
        Self {
            turn_threshold_px: 80,
            base_speed_pct: 40.0,
            turn_speed_pct: 50.0,
            recovery_speed_pct: 30.0,
            reverse_duration_s: 0.5,
            scan_dwell_s: 0.5,
            scan_headings_deg: vec![45.0, 135.0, 90.0],
            turn_rate_deg_s: 45.0,
            max_recovery_cycles: None,
        }
    }
}

impl FollowCtrlParams {
    /// Check that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for &(name, speed) in &[
            ("base_speed_pct", self.base_speed_pct),
            ("turn_speed_pct", self.turn_speed_pct),
            ("recovery_speed_pct", self.recovery_speed_pct),
        ] {
            if !in_range(speed, 0.0, MAX_SPEED_PCT) {
                return Err(ParamsError::InvalidSpeed(name, speed))
            }
        }

        for &(name, dur) in &[
            ("reverse_duration_s", self.reverse_duration_s),
            ("scan_dwell_s", self.scan_dwell_s),
        ] {
            if !dur.is_finite() || dur < 0.0 {
                return Err(ParamsError::InvalidDuration(name, dur))
            }
        }

        if self.turn_threshold_px < 0 {
            return Err(ParamsError::InvalidTurnThreshold(self.turn_threshold_px))
        }

        if !self.turn_rate_deg_s.is_finite() || self.turn_rate_deg_s <= 0.0 {
            return Err(ParamsError::InvalidTurnRate(self.turn_rate_deg_s))
        }

        if self.scan_headings_deg.is_empty() {
            return Err(ParamsError::EmptyScanPlan)
        }

        if let Some(h) = self
            .scan_headings_deg
            .iter()
            .find(|h| !in_range(**h, MIN_HEADING_DEG, MAX_HEADING_DEG))
        {
            return Err(ParamsError::InvalidScanHeading(*h))
        }

        Ok(())
    }

    pub fn reverse_duration(&self) -> Duration {
        Duration::from_secs_f64(self.reverse_duration_s)
    }

    pub fn scan_dwell(&self) -> Duration {
        Duration::from_secs_f64(self.scan_dwell_s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(FollowCtrlParams::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml_without_cap() {
        let params: FollowCtrlParams = util::params::from_str(
            r#"
            turn_threshold_px = 80
            base_speed_pct = 40.0
            turn_speed_pct = 50.0
            recovery_speed_pct = 30.0
            reverse_duration_s = 0.5
            scan_dwell_s = 0.5
            scan_headings_deg = [45.0, 135.0, 90.0]
            turn_rate_deg_s = 45.0
            "#,
        )
        .unwrap();

        assert!(params.validate().is_ok());
        assert_eq!(params.max_recovery_cycles, None);
        assert_eq!(params.reverse_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_params() {
        let mut p = FollowCtrlParams::default();
        p.turn_speed_pct = 120.0;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::InvalidSpeed("turn_speed_pct", _))
        ));

        let mut p = FollowCtrlParams::default();
        p.scan_headings_deg.clear();
        assert!(matches!(p.validate(), Err(ParamsError::EmptyScanPlan)));

        let mut p = FollowCtrlParams::default();
        p.scan_headings_deg.push(200.0);
        assert!(matches!(p.validate(), Err(ParamsError::InvalidScanHeading(_))));

        let mut p = FollowCtrlParams::default();
        p.scan_dwell_s = -0.1;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidDuration(_, _))));

        let mut p = FollowCtrlParams::default();
        p.turn_rate_deg_s = 0.0;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidTurnRate(_))));

        let mut p = FollowCtrlParams::default();
        p.turn_threshold_px = -1;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidTurnThreshold(-1))));
    }
}
