//! # Raspberry Pi GPIO backend
//!
//! Uses `rppal`'s software PWM on plain GPIO output pins, matching how the rover's H-bridge
//! enable inputs and camera servo are wired.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::EqptError;
use log::{debug, info};
use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};
use util::time::StopSignal;

use super::{DigitalOut, HBridgeDrive, MechParams, MotorChannel, MotorPins, PwmOut, ServoHeading};
use crate::odom::{EncoderCounter, Odometry};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct RpiPin(OutputPin);

pub struct RpiPwm {
    pin: OutputPin,
    frequency_hz: f64,
}

/// All the rover's mechanisms on GPIO pins.
pub struct RpiMech {
    pub drive: HBridgeDrive<RpiPin, RpiPwm>,
    pub heading: ServoHeading<RpiPwm>,

    /// Encoder counts, present if the encoders are enabled.
    pub odometry: Option<Odometry>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DigitalOut for RpiPin {
    fn set_level(&mut self, high: bool) -> Result<(), EqptError> {
        if high {
            self.0.set_high()
        } else {
            self.0.set_low()
        }
        Ok(())
    }
}

impl PwmOut for RpiPwm {
    fn set_duty_cycle(&mut self, duty_pct: f64) -> Result<(), EqptError> {
        if duty_pct <= 0.0 {
            self.pin.clear_pwm().map_err(gpio_err)?;
            self.pin.set_low();
            Ok(())
        } else {
            self.pin
                .set_pwm_frequency(self.frequency_hz, duty_pct / 100.0)
                .map_err(gpio_err)
        }
    }
}

impl RpiMech {
    /// Acquire the GPIO pins and build the drivers. All outputs start low.
    ///
    /// The pins are released, and reset to inputs, when this struct is dropped. Servo settling is
    /// cut short by `stop`.
    pub fn init(params: &MechParams, stop: StopSignal) -> Result<Self, EqptError> {
        let gpio = Gpio::new().map_err(gpio_err)?;

        let output = |pin: u8| -> Result<OutputPin, EqptError> {
            Ok(gpio.get(pin).map_err(gpio_err)?.into_output_low())
        };

        let channel = |pins: &MotorPins, inverted: bool| -> Result<_, EqptError> {
            Ok(MotorChannel::new(
                RpiPin(output(pins.in_a)?),
                RpiPin(output(pins.in_b)?),
                RpiPwm {
                    pin: output(pins.enable)?,
                    frequency_hz: params.motor_pwm_freq_hz,
                },
                inverted,
            ))
        };

        let drive = HBridgeDrive::new(
            channel(&params.left_motor, false)?,
            channel(&params.right_motor, true)?,
        );
        debug!("H-bridge pins acquired");

        let heading = ServoHeading::new(
            RpiPwm {
                pin: output(params.servo.pin)?,
                frequency_hz: params.servo.pwm_freq_hz,
            },
            params.servo,
            stop,
        );
        debug!("Servo pin acquired");

        let odometry = if params.encoders.enabled {
            let odometry = Odometry::new(params.encoders.geometry);

            let input = |pin: u8, counter: EncoderCounter| -> Result<InputPin, EqptError> {
                let mut input = gpio.get(pin).map_err(gpio_err)?.into_input_pullup();
                input
                    .set_async_interrupt(Trigger::RisingEdge, move |_| counter.increment())
                    .map_err(gpio_err)?;
                Ok(input)
            };

            let left = input(params.encoders.left_pin, odometry.left.clone())?;
            let right = input(params.encoders.right_pin, odometry.right.clone())?;
            info!("Wheel encoders enabled");

            // The interrupts only fire while the pins are alive
            Some(odometry.with_pulse_source((left, right)))
        } else {
            None
        };

        Ok(Self {
            drive,
            heading,
            odometry,
        })
    }
}

fn gpio_err(e: rppal::gpio::Error) -> EqptError {
    EqptError::Gpio(e.to_string())
}
