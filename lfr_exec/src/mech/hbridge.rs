//! # Dual H-bridge drive
//!
//! Each side of the rover is driven by one channel of a dual H-bridge. A channel has two
//! direction inputs, whose levels select forward, backward or off, and an enable input carrying
//! a PWM signal whose duty cycle sets the speed.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{DriveActuator, DriveDems, DriveIntent, EqptError};

use super::{DigitalOut, PwmOut};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One motor channel of the H-bridge.
#[derive(Debug)]
pub struct MotorChannel<O, P> {
    pub in_a: O,
    pub in_b: O,
    pub enable: P,

    /// If true the motor turns forward with `in_b` high rather than `in_a`.
    pub inverted: bool,
}

/// Differential drive through a dual H-bridge.
#[derive(Debug)]
pub struct HBridgeDrive<O, P> {
    left: MotorChannel<O, P>,
    right: MotorChannel<O, P>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDir {
    Forward,
    Backward,
    Off,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WheelDir {
    /// Directions of the (left, right) wheels for an intent.
    pub fn for_intent(intent: DriveIntent) -> (WheelDir, WheelDir) {
        match intent {
            DriveIntent::Forward => (WheelDir::Forward, WheelDir::Forward),
            DriveIntent::Reverse => (WheelDir::Backward, WheelDir::Backward),
            DriveIntent::PivotLeft => (WheelDir::Backward, WheelDir::Forward),
            DriveIntent::PivotRight => (WheelDir::Forward, WheelDir::Backward),
            DriveIntent::Stop => (WheelDir::Off, WheelDir::Off),
        }
    }
}

impl<O, P> MotorChannel<O, P>
where
    O: DigitalOut,
    P: PwmOut,
{
    pub fn new(in_a: O, in_b: O, enable: P, inverted: bool) -> Self {
        Self {
            in_a,
            in_b,
            enable,
            inverted,
        }
    }

    /// Set the direction pins then the speed of the channel.
    fn set(&mut self, dir: WheelDir, speed_pct: f64) -> Result<(), EqptError> {
        let (a, b) = match (dir, self.inverted) {
            (WheelDir::Forward, false) | (WheelDir::Backward, true) => (true, false),
            (WheelDir::Backward, false) | (WheelDir::Forward, true) => (false, true),
            (WheelDir::Off, _) => (false, false),
        };

        self.in_a.set_level(a)?;
        self.in_b.set_level(b)?;

        match dir {
            WheelDir::Off => self.enable.set_duty_cycle(0.0),
            _ => self.enable.set_duty_cycle(speed_pct),
        }
    }
}

impl<O, P> HBridgeDrive<O, P>
where
    O: DigitalOut,
    P: PwmOut,
{
    pub fn new(left: MotorChannel<O, P>, right: MotorChannel<O, P>) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &MotorChannel<O, P> {
        &self.left
    }

    pub fn right(&self) -> &MotorChannel<O, P> {
        &self.right
    }
}

impl<O, P> DriveActuator for HBridgeDrive<O, P>
where
    O: DigitalOut,
    P: PwmOut,
{
    fn set_command(&mut self, dems: DriveDems) -> Result<(), EqptError> {
        if !dems.is_valid() {
            return Err(EqptError::InvalidDems(dems));
        }

        let (left_dir, right_dir) = WheelDir::for_intent(dems.intent);

        self.left.set(left_dir, dems.left_pct)?;
        self.right.set(right_dir, dems.right_pct)?;

        Ok(())
    }
}
