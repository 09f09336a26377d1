//! # Odometry
//!
//! Wheel encoder pulse counting. The counts are only reported, the controller never uses them to
//! make decisions.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Counts encoder pulses for one wheel.
///
/// Clones share the same count, so one clone can be moved into an interrupt callback.
#[derive(Debug, Clone, Default)]
pub struct EncoderCounter(Arc<AtomicU64>);

/// Wheel geometry used to turn pulse counts into distances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WheelGeometry {
    /// Units: centimeters
    pub wheel_diameter_cm: f64,

    pub pulses_per_rev: u32,
}

/// Left and right encoder counters of the rover.
pub struct Odometry {
    pub left: EncoderCounter,
    pub right: EncoderCounter,
    geometry: WheelGeometry,

    /// Whatever feeds pulses into the counters, released when the odometry is dropped.
    _pulse_source: Option<Box<dyn Send>>,
}

/// Distances travelled by each wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OdometryReport {
    pub left_pulses: u64,
    pub right_pulses: u64,

    /// Units: centimeters
    pub left_cm: f64,

    /// Units: centimeters
    pub right_cm: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EncoderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pulse.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            wheel_diameter_cm: 4.05,
            pulses_per_rev: 20,
        }
    }
}

impl WheelGeometry {
    /// Distance travelled by the wheel for each encoder pulse.
    ///
    /// Units: centimeters
    pub fn cm_per_pulse(&self) -> f64 {
        std::f64::consts::PI * self.wheel_diameter_cm / self.pulses_per_rev as f64
    }
}

impl Odometry {
    pub fn new(geometry: WheelGeometry) -> Self {
        Self {
            left: EncoderCounter::new(),
            right: EncoderCounter::new(),
            geometry,
            _pulse_source: None,
        }
    }

    /// Keep `source` alive for as long as this odometry, for example the interrupt pins which
    /// increment the counters.
    pub fn with_pulse_source<S: Send + 'static>(mut self, source: S) -> Self {
        self._pulse_source = Some(Box::new(source));
        self
    }

    pub fn report(&self) -> OdometryReport {
        let left_pulses = self.left.count();
        let right_pulses = self.right.count();
        let cm_per_pulse = self.geometry.cm_per_pulse();

        OdometryReport {
            left_pulses,
            right_pulses,
            left_cm: left_pulses as f64 * cm_per_pulse,
            right_cm: right_pulses as f64 * cm_per_pulse,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_one_revolution() {
        let odom = Odometry::new(WheelGeometry::default());

        // Counts are shared with clones handed to interrupt handlers
        let left = odom.left.clone();
        for _ in 0..20 {
            left.increment();
        }
        odom.right.increment();

        let report = odom.report();
        assert_eq!(report.left_pulses, 20);
        assert_eq!(report.right_pulses, 1);
        assert!((report.left_cm - std::f64::consts::PI * 4.05).abs() < 1e-9);
        assert!((report.right_cm - std::f64::consts::PI * 4.05 / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_pulses() {
        let report = Odometry::new(WheelGeometry::default()).report();
        assert_eq!(report.left_cm, 0.0);
        assert_eq!(report.right_cm, 0.0);
    }
}
