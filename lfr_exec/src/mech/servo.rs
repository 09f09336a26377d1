//! # Camera heading servo

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{
    heading::{MAX_HEADING_DEG, MIN_HEADING_DEG},
    EqptError, HeadingActuator,
};
use std::thread;
use util::{
    maths::{clamp, lin_map},
    time::{wait_unless_stopped, StopSignal},
};

use super::{PwmOut, ServoParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Positional servo aiming the camera, driven by a PWM output.
///
/// After each move the servo is given a fixed time to settle and then its signal is idled, which
/// stops it jittering while the rover drives. The settle time of a `set_angle` is cut short by
/// the stop signal, that of a `set_angle_blocking` is not.
#[derive(Debug)]
pub struct ServoHeading<P> {
    pwm: P,
    params: ServoParams,
    stop: StopSignal,
    angle_deg: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<P: PwmOut> ServoHeading<P> {
    pub fn new(pwm: P, params: ServoParams, stop: StopSignal) -> Self {
        Self {
            pwm,
            params,
            stop,
            angle_deg: None,
        }
    }

    /// Duty cycle which holds the servo at `angle_deg`, which must already be in range.
    pub fn duty_for_angle(&self, angle_deg: f64) -> f64 {
        lin_map(
            (MIN_HEADING_DEG, MAX_HEADING_DEG),
            (self.params.duty_at_min_pct, self.params.duty_at_max_pct),
            angle_deg,
        )
    }

    /// The last angle the servo was moved to.
    pub fn angle_deg(&self) -> Option<f64> {
        self.angle_deg
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    fn move_to(&mut self, angle_deg: f64, interruptible: bool) -> Result<(), EqptError> {
        if !angle_deg.is_finite() {
            return Err(EqptError::InvalidAngle(angle_deg));
        }

        let angle_deg = clamp(&angle_deg, &MIN_HEADING_DEG, &MAX_HEADING_DEG);

        self.pwm.set_duty_cycle(self.duty_for_angle(angle_deg))?;
        if interruptible {
            wait_unless_stopped(self.params.settle(), &self.stop);
        } else {
            thread::sleep(self.params.settle());
        }
        self.pwm.set_duty_cycle(0.0)?;

        self.angle_deg = Some(angle_deg);

        Ok(())
    }
}

impl<P: PwmOut> HeadingActuator for ServoHeading<P> {
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), EqptError> {
        self.move_to(angle_deg, true)
    }

    fn set_angle_blocking(&mut self, angle_deg: f64) -> Result<(), EqptError> {
        self.move_to(angle_deg, false)
    }
}
