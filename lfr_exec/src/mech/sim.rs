//! # Simulated pins
//!
//! Pins which hold their state in memory, used to run the drivers without GPIO hardware.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::EqptError;
use log::trace;
use util::time::StopSignal;

use super::{DigitalOut, HBridgeDrive, MechParams, MotorChannel, PwmOut, ServoHeading};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SimPin {
    pub pin: u8,
    pub level: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SimPwm {
    pub pin: u8,
    pub frequency_hz: f64,
    pub duty_pct: f64,

    /// Every duty cycle set on the output, oldest first.
    pub history: Vec<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimPin {
    pub fn new(pin: u8) -> Self {
        Self { pin, level: false }
    }
}

impl DigitalOut for SimPin {
    fn set_level(&mut self, high: bool) -> Result<(), EqptError> {
        self.level = high;
        Ok(())
    }
}

impl SimPwm {
    pub fn new(pin: u8, frequency_hz: f64) -> Self {
        Self {
            pin,
            frequency_hz,
            ..Default::default()
        }
    }
}

impl PwmOut for SimPwm {
    fn set_duty_cycle(&mut self, duty_pct: f64) -> Result<(), EqptError> {
        if !(0.0..=100.0).contains(&duty_pct) {
            return Err(EqptError::Gpio(format!(
                "Duty cycle {} % out of range on pin {}",
                duty_pct, self.pin
            )));
        }

        trace!("SimPwm {}: {:.2} %", self.pin, duty_pct);
        self.duty_pct = duty_pct;
        self.history.push(duty_pct);
        Ok(())
    }
}

/// Build the drive on simulated pins.
pub fn sim_drive(params: &MechParams) -> HBridgeDrive<SimPin, SimPwm> {
    let channel = |pins: &super::MotorPins, inverted| {
        MotorChannel::new(
            SimPin::new(pins.in_a),
            SimPin::new(pins.in_b),
            SimPwm::new(pins.enable, params.motor_pwm_freq_hz),
            inverted,
        )
    };

    HBridgeDrive::new(channel(&params.left_motor, false), channel(&params.right_motor, true))
}

/// Build the heading servo on a simulated pin, its settling cut short by `stop`.
pub fn sim_heading(params: &MechParams, stop: StopSignal) -> ServoHeading<SimPwm> {
    ServoHeading::new(
        SimPwm::new(params.servo.pin, params.servo.pwm_freq_hz),
        params.servo,
        stop,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::{DriveActuator, DriveDems};

    #[test]
    fn test_sim_drive_pins() {
        let mut d = sim_drive(&MechParams::default());
        assert_eq!(d.left().in_a.pin, 23);
        assert_eq!(d.left().enable.pin, 13);
        assert_eq!(d.right().in_b.pin, 22);
        assert_eq!(d.right().enable.frequency_hz, 1000.0);

        d.set_command(DriveDems::forward(40.0)).unwrap();
        assert!(d.right().in_b.level);
    }

    #[test]
    fn test_pwm_range() {
        let mut pwm = SimPwm::new(12, 1000.0);
        assert!(pwm.set_duty_cycle(101.0).is_err());
        assert!(pwm.history.is_empty());
    }
}
