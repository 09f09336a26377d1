//! # Drive Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::EqptError;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Maximum speed demand, as a percentage of the maximum drive output.
pub const MAX_SPEED_PCT: f64 = 100.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands sent to the drive actuator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DriveDems {
    /// What the drive should do
    pub intent: DriveIntent,

    /// Speed of the left side wheels.
    ///
    /// Units: percentage of the maximum drive output, 0 to 100
    pub left_pct: f64,

    /// Speed of the right side wheels.
    ///
    /// Units: percentage of the maximum drive output, 0 to 100
    pub right_pct: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible drive intents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveIntent {
    /// Both sides forward.
    Forward,

    /// Both sides backward.
    Reverse,

    /// Turn on the spot to the left: left side backward, right side forward.
    PivotLeft,

    /// Turn on the spot to the right: left side forward, right side backward.
    PivotRight,

    /// All wheels stopped.
    Stop,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// An actuator which can drive the rover's wheels.
pub trait DriveActuator {
    /// Execute the given demands until new demands are set.
    fn set_command(&mut self, dems: DriveDems) -> Result<(), EqptError>;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveDems {
    /// Demands with the same speed on both sides.
    pub fn new(intent: DriveIntent, speed_pct: f64) -> Self {
        match intent {
            DriveIntent::Stop => Self::stop(),
            _ => Self {
                intent,
                left_pct: speed_pct,
                right_pct: speed_pct,
            },
        }
    }

    pub fn forward(speed_pct: f64) -> Self {
        Self::new(DriveIntent::Forward, speed_pct)
    }

    pub fn reverse(speed_pct: f64) -> Self {
        Self::new(DriveIntent::Reverse, speed_pct)
    }

    pub fn pivot_left(speed_pct: f64) -> Self {
        Self::new(DriveIntent::PivotLeft, speed_pct)
    }

    pub fn pivot_right(speed_pct: f64) -> Self {
        Self::new(DriveIntent::PivotRight, speed_pct)
    }

    /// Demands which bring the rover to a stop.
    pub fn stop() -> Self {
        Self {
            intent: DriveIntent::Stop,
            left_pct: 0.0,
            right_pct: 0.0,
        }
    }

    /// Determine if the demands are valid, i.e. both speeds lie within 0 to 100 and a stop
    /// demands zero speed.
    pub fn is_valid(&self) -> bool {
        let speed_ok = |s: f64| s >= 0.0 && s <= MAX_SPEED_PCT;

        match self.intent {
            DriveIntent::Stop => self.left_pct == 0.0 && self.right_pct == 0.0,
            _ => speed_ok(self.left_pct) && speed_ok(self.right_pct),
        }
    }
}
