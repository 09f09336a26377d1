//! # Test utilities
//!
//! Fakes for the equipment and clock used by the follow controller. Each fake is a cheap handle
//! onto shared state, so a test keeps one clone to inspect while the controller owns another.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use eqpt_if::{DriveActuator, DriveDems, EqptError, HeadingActuator};
use util::time::{Clock, WaitOutcome};

use crate::{
    follow_ctrl::{EventSink, FollowCtrl, FollowCtrlParams, FollowEqpt, FollowEvent, FollowMode},
    line_det::{LineObservation, LineSensor},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Clock which only moves when told to, or when waited on.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    interrupt_waits: Rc<Cell<bool>>,
    waits: Rc<RefCell<Vec<Duration>>>,
}

/// Drive which records every command it receives.
#[derive(Clone, Default)]
pub struct RecordingDrive {
    commands: Rc<RefCell<Vec<DriveDems>>>,
    fail: Rc<Cell<bool>>,
}

/// Heading actuator which records every angle it receives.
#[derive(Clone, Default)]
pub struct RecordingHeading {
    angles: Rc<RefCell<Vec<f64>>>,
    blocking_calls: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

/// Line sensor which plays back a script of observations, then reports no line.
#[derive(Clone, Default)]
pub struct ScriptedSensor {
    script: Rc<RefCell<VecDeque<LineObservation>>>,
    calls: Rc<Cell<usize>>,
}

/// Sink which records every event.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<FollowEvent>>>,
}

/// A full set of fakes for building a controller.
#[derive(Clone, Default)]
pub struct Rig {
    pub clock: ManualClock,
    pub drive: RecordingDrive,
    pub heading: RecordingHeading,
    pub sensor: ScriptedSensor,
    pub sink: RecordingSink,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ManualClock {
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs))
    }

    /// Make every following wait return as interrupted.
    pub fn interrupt_waits(&self) {
        self.interrupt_waits.set(true);
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        self.waits.borrow_mut().push(duration);

        if self.interrupt_waits.get() {
            WaitOutcome::Interrupted
        } else {
            self.advance(duration);
            WaitOutcome::Elapsed
        }
    }
}

impl RecordingDrive {
    pub fn commands(&self) -> Vec<DriveDems> {
        self.commands.borrow().clone()
    }

    pub fn last(&self) -> Option<DriveDems> {
        self.commands.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear()
    }

    /// Make every following command fail.
    pub fn fail(&self) {
        self.fail.set(true)
    }
}

impl DriveActuator for RecordingDrive {
    fn set_command(&mut self, dems: DriveDems) -> Result<(), EqptError> {
        if self.fail.get() {
            return Err(EqptError::Gpio("drive unplugged".into()));
        }
        self.commands.borrow_mut().push(dems);
        Ok(())
    }
}

impl RecordingHeading {
    pub fn angles(&self) -> Vec<f64> {
        self.angles.borrow().clone()
    }

    pub fn last(&self) -> Option<f64> {
        self.angles.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.angles.borrow_mut().clear()
    }

    /// Make every following move fail.
    pub fn fail(&self) {
        self.fail.set(true)
    }

    /// Number of moves which were not allowed to be cut short.
    pub fn blocking_calls(&self) -> usize {
        self.blocking_calls.get()
    }
}

impl HeadingActuator for RecordingHeading {
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), EqptError> {
        if self.fail.get() {
            return Err(EqptError::Gpio("servo unplugged".into()));
        }
        self.angles.borrow_mut().push(angle_deg);
        Ok(())
    }

    fn set_angle_blocking(&mut self, angle_deg: f64) -> Result<(), EqptError> {
        self.blocking_calls.set(self.blocking_calls.get() + 1);
        self.set_angle(angle_deg)
    }
}

impl ScriptedSensor {
    pub fn push(&self, obs: LineObservation) {
        self.script.borrow_mut().push_back(obs)
    }

    /// Number of observations taken so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl LineSensor for ScriptedSensor {
    fn observe(&mut self) -> Result<LineObservation, EqptError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(LineObservation::not_found))
    }
}

impl RecordingSink {
    pub fn events(&self) -> Vec<FollowEvent> {
        self.events.borrow().clone()
    }

    /// The modes entered, in order.
    pub fn modes(&self) -> Vec<FollowMode> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                FollowEvent::ModeEntered(m) => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: FollowEvent) {
        self.events.borrow_mut().push(event)
    }
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller driving this rig's fakes.
    pub fn ctrl(&self, params: FollowCtrlParams) -> FollowCtrl {
        FollowCtrl::new(
            params,
            FollowEqpt {
                sensor: Box::new(self.sensor.clone()),
                drive: Box::new(self.drive.clone()),
                heading: Box::new(self.heading.clone()),
            },
            Box::new(self.clock.clone()),
            Box::new(self.sink.clone()),
        )
        .unwrap()
    }
}
