//! # Mechanisms parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, time::Duration};
use thiserror::Error;
use util::maths::in_range;

use crate::odom::WheelGeometry;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the rover's mechanisms. Pin numbers are BCM GPIO numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechParams {
    /// Left side motor, IN1/IN2 and ENB on the H-bridge board.
    pub left_motor: MotorPins,

    /// Right side motor, IN3/IN4 and ENA on the H-bridge board. This motor is mounted mirrored
    /// to the left one, so its direction pins are inverted.
    pub right_motor: MotorPins,

    /// Units: Hertz
    pub motor_pwm_freq_hz: f64,

    pub servo: ServoParams,

    pub encoders: EncoderParams,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotorPins {
    pub in_a: u8,
    pub in_b: u8,
    pub enable: u8,
}

/// Parameters of the camera heading servo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServoParams {
    pub pin: u8,

    /// Units: Hertz
    pub pwm_freq_hz: f64,

    /// Duty cycle which moves the servo to 0 degrees.
    ///
    /// Units: percent
    pub duty_at_min_pct: f64,

    /// Duty cycle which moves the servo to 180 degrees.
    ///
    /// Units: percent
    pub duty_at_max_pct: f64,

    /// Time the servo is given to reach its demanded angle before the signal is idled.
    ///
    /// Units: seconds
    pub settle_s: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EncoderParams {
    /// If false the encoder pins are not used and no odometry is reported.
    pub enabled: bool,

    pub left_pin: u8,
    pub right_pin: u8,

    pub geometry: WheelGeometry,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("GPIO pin {0} is assigned more than once")]
    DuplicatePin(u8),

    #[error("PWM frequency must be positive, found {0} Hz")]
    InvalidFrequency(f64),

    #[error("Servo duty cycles must be between 0 and 100 %, found {0} %")]
    InvalidDuty(f64),

    #[error("Servo settle time must be finite and not negative, found {0} s")]
    InvalidSettleTime(f64),

    #[error("Wheel geometry is invalid: diameter {0} cm, {1} pulses per revolution")]
    InvalidGeometry(f64, u32),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for MechParams {
    fn default() -> Self {
        Self {
            left_motor: MotorPins {
                in_a: 23,
                in_b: 24,
                enable: 13,
            },
            right_motor: MotorPins {
                in_a: 27,
                in_b: 22,
                enable: 12,
            },
            motor_pwm_freq_hz: 1000.0,
            servo: ServoParams::default(),
            encoders: EncoderParams {
                enabled: false,
                left_pin: 16,
                right_pin: 17,
                geometry: WheelGeometry::default(),
            },
        }
    }
}

impl Default for ServoParams {
    fn default() -> Self {
        Self {
            pin: 26,
            pwm_freq_hz: 50.0,
            duty_at_min_pct: 2.5,
            duty_at_max_pct: 12.5,
            settle_s: 0.3,
        }
    }
}

impl ServoParams {
    pub fn settle(&self) -> Duration {
        Duration::from_secs_f64(self.settle_s)
    }
}

impl MechParams {
    /// Check that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let mut pins = vec![
            self.left_motor.in_a,
            self.left_motor.in_b,
            self.left_motor.enable,
            self.right_motor.in_a,
            self.right_motor.in_b,
            self.right_motor.enable,
            self.servo.pin,
        ];
        if self.encoders.enabled {
            pins.push(self.encoders.left_pin);
            pins.push(self.encoders.right_pin);
        }

        let mut seen = HashSet::new();
        for pin in pins {
            if !seen.insert(pin) {
                return Err(ParamsError::DuplicatePin(pin));
            }
        }

        for &freq in &[self.motor_pwm_freq_hz, self.servo.pwm_freq_hz] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ParamsError::InvalidFrequency(freq));
            }
        }

        for &duty in &[self.servo.duty_at_min_pct, self.servo.duty_at_max_pct] {
            if !in_range(duty, 0.0, 100.0) {
                return Err(ParamsError::InvalidDuty(duty));
            }
        }

        if !self.servo.settle_s.is_finite() || self.servo.settle_s < 0.0 {
            return Err(ParamsError::InvalidSettleTime(self.servo.settle_s));
        }

        let geom = &self.encoders.geometry;
        if !geom.wheel_diameter_cm.is_finite()
            || geom.wheel_diameter_cm <= 0.0
            || geom.pulses_per_rev == 0
        {
            return Err(ParamsError::InvalidGeometry(
                geom.wheel_diameter_cm,
                geom.pulses_per_rev,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(MechParams::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_pin() {
        let mut p = MechParams::default();
        p.servo.pin = 23;
        assert!(matches!(p.validate(), Err(ParamsError::DuplicatePin(23))));

        // Encoder pins only count when the encoders are used
        let mut p = MechParams::default();
        p.encoders.left_pin = 26;
        assert!(p.validate().is_ok());
        p.encoders.enabled = true;
        assert!(matches!(p.validate(), Err(ParamsError::DuplicatePin(26))));
    }

    #[test]
    fn test_invalid_servo() {
        let mut p = MechParams::default();
        p.servo.duty_at_max_pct = 120.0;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidDuty(_))));

        let mut p = MechParams::default();
        p.servo.pwm_freq_hz = 0.0;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidFrequency(_))));
    }
}
