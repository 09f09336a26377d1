//! # Follow Control module
//!
//! This module implements the [`FollowCtrl`] state machine, which keeps the rover on the line and
//! recovers it when the line is lost. The state machine is broken down into four modes:
//!
//! - `Normal` - The line is being tracked. Each cycle a fresh observation is taken and the rover
//!   drives forward, or pivots towards the line if it has drifted past the turn threshold.
//! - `Reversing` - The line was lost. The rover backs up for a fixed time.
//! - `Scanning` - The rover is stationary and aims the camera at each heading of the scan plan
//!   in turn, looking for the line.
//! - `Turning` - The line was found at a heading, the rover pivots to face it and returns to
//!   `Normal`.
//!
//! If every heading of a scan fails the rover reverses again and repeats the scan. An optional
//! cap on the number of these recovery cycles can be set in the parameters.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod normal;
mod params;
mod reversing;
mod scan_plan;
mod scanning;
pub mod tm;
mod turn;
mod turning;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use params::{FollowCtrlParams, ParamsError};
pub use scan_plan::ScanPlan;
pub use tm::{EventSink, FollowEvent, LogSink};
pub use turn::{PivotDir, TurnPlan};

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{heading::CENTER_HEADING_DEG, DriveActuator, DriveDems, EqptError, HeadingActuator};
use log::error;
use serde::Serialize;
use std::time::Duration;
use util::time::Clock;

use crate::{
    line_det::{LineObservation, LineSensor},
    odom::Odometry,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The equipment driven by the controller.
pub struct FollowEqpt {
    pub sensor: Box<dyn LineSensor>,
    pub drive: Box<dyn DriveActuator>,
    pub heading: Box<dyn HeadingActuator>,
}

/// Line follow controller
///
/// Owns all the equipment it commands. It must be shut down with [`FollowCtrl::shutdown`], which
/// leaves the rover stopped with the camera centered.
pub struct FollowCtrl {
    params: FollowCtrlParams,

    state: FollowState,

    scan_plan: ScanPlan,

    /// Number of consecutive scans which failed to find the line.
    recovery_cycles: u32,

    eqpt: FollowEqpt,

    clock: Box<dyn Clock>,

    sink: Box<dyn EventSink>,

    odometry: Option<Odometry>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Current state of the controller, including the data which is only valid in that state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowState {
    Normal,

    /// Backing up, started at `since` (clock time).
    Reversing { since: Duration },

    /// Camera aimed at the current probe heading at `probe_since` (clock time).
    Scanning { probe_since: Duration },

    /// Turning to face the line, which was found at `heading_deg`.
    Turning { heading_deg: f64 },
}

/// The mode of the controller, without the state data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowMode {
    Normal,
    Reversing,
    Scanning,
    Turning,
}

/// Outcome of a single controller step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed, the controller can be stepped again.
    Continue,

    /// A blocking wait inside the step was cut short by a stop request. The controller should be
    /// shut down.
    Interrupted,
}

#[derive(Debug, thiserror::Error)]
pub enum FollowCtrlError {
    #[error("Failed to load FollowCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("FollowCtrl parameters are invalid: {0}")]
    ParamsInvalid(ParamsError),

    #[error("Equipment error: {0}")]
    Eqpt(EqptError),

    #[error("The line could not be found after {0} recovery cycles")]
    LineLost(u32),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowState {
    pub fn mode(&self) -> FollowMode {
        match self {
            FollowState::Normal => FollowMode::Normal,
            FollowState::Reversing { .. } => FollowMode::Reversing,
            FollowState::Scanning { .. } => FollowMode::Scanning,
            FollowState::Turning { .. } => FollowMode::Turning,
        }
    }
}

impl FollowCtrl {
    /// Create a new controller in `Normal` mode.
    ///
    /// No equipment is commanded until [`FollowCtrl::start`] or [`FollowCtrl::step`] is called.
    pub fn new(
        params: FollowCtrlParams,
        eqpt: FollowEqpt,
        clock: Box<dyn Clock>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, FollowCtrlError> {
        params.validate()?;
        let scan_plan = ScanPlan::new(params.scan_headings_deg.clone())?;

        Ok(Self {
            params,
            state: FollowState::Normal,
            scan_plan,
            recovery_cycles: 0,
            eqpt,
            clock,
            sink,
            odometry: None,
        })
    }

    /// Attach encoder odometry, whose totals are reported at shutdown.
    pub fn with_odometry(mut self, odometry: Odometry) -> Self {
        self.odometry = Some(odometry);
        self
    }

    /// Bring the equipment into its starting configuration: drive stopped, camera centered.
    pub fn start(&mut self) -> Result<(), FollowCtrlError> {
        self.command(DriveDems::stop())?;
        self.aim(CENTER_HEADING_DEG)?;
        self.sink.emit(FollowEvent::ModeEntered(self.state.mode()));
        Ok(())
    }

    /// Run one cycle of the state machine.
    pub fn step(&mut self) -> Result<StepStatus, FollowCtrlError> {
        match self.state {
            FollowState::Normal => self.step_normal(),
            FollowState::Reversing { since } => self.step_reversing(since),
            FollowState::Scanning { probe_since } => self.step_scanning(probe_since),
            FollowState::Turning { heading_deg } => self.step_turning(heading_deg),
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn mode(&self) -> FollowMode {
        self.state.mode()
    }

    pub fn recovery_cycles(&self) -> u32 {
        self.recovery_cycles
    }

    /// Stop the drive, center the camera and release the equipment.
    ///
    /// Errors from the equipment are logged and don't prevent the remaining steps from running.
    /// The camera is given its full settle time even if a stop has been requested.
    pub fn shutdown(mut self) {
        if let Err(e) = self.command(DriveDems::stop()) {
            error!("Could not stop the drive during shutdown: {}", e);
        }

        match self.eqpt.heading.set_angle_blocking(CENTER_HEADING_DEG) {
            Ok(()) => self.sink.emit(FollowEvent::HeadingCommanded {
                heading_deg: CENTER_HEADING_DEG,
            }),
            Err(e) => error!("Could not center the camera during shutdown: {}", e),
        }

        let odometry = self.odometry.as_ref().map(|o| o.report());
        self.sink.emit(FollowEvent::Shutdown {
            mode: self.state.mode(),
            odometry,
        });

        // Equipment is released as self drops here
    }

    /// Take a fresh observation of the line.
    pub(crate) fn observe(&mut self) -> Result<LineObservation, FollowCtrlError> {
        let obs = self.eqpt.sensor.observe()?;
        self.sink.emit(FollowEvent::Observation(obs));
        Ok(obs)
    }

    pub(crate) fn command(&mut self, dems: DriveDems) -> Result<(), FollowCtrlError> {
        self.eqpt.drive.set_command(dems)?;
        self.sink.emit(FollowEvent::DriveCommanded(dems));
        Ok(())
    }

    pub(crate) fn aim(&mut self, heading_deg: f64) -> Result<(), FollowCtrlError> {
        self.eqpt.heading.set_angle(heading_deg)?;
        self.sink
            .emit(FollowEvent::HeadingCommanded { heading_deg });
        Ok(())
    }

    /// Move into a new state, emitting an event if the mode changed.
    pub(crate) fn enter(&mut self, state: FollowState) {
        let prev_mode = self.state.mode();
        self.state = state;

        if state.mode() != prev_mode {
            self.sink.emit(FollowEvent::ModeEntered(state.mode()));
        }
    }

    /// Start backing up and arm the reverse timer.
    pub(crate) fn begin_reversing(&mut self) -> Result<(), FollowCtrlError> {
        self.command(DriveDems::reverse(self.params.recovery_speed_pct))?;
        let since = self.clock.now();
        self.enter(FollowState::Reversing { since });
        Ok(())
    }

    /// Time elapsed since `since` on the controller's clock.
    pub(crate) fn elapsed_since(&self, since: Duration) -> Duration {
        self.clock.now().checked_sub(since).unwrap_or_default()
    }
}

impl From<util::params::LoadError> for FollowCtrlError {
    fn from(e: util::params::LoadError) -> Self {
        FollowCtrlError::ParamLoadError(e)
    }
}

impl From<ParamsError> for FollowCtrlError {
    fn from(e: ParamsError) -> Self {
        FollowCtrlError::ParamsInvalid(e)
    }
}

impl From<EqptError> for FollowCtrlError {
    fn from(e: EqptError) -> Self {
        FollowCtrlError::Eqpt(e)
    }
}
