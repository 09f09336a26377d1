//! # Follow controller telemetry
//!
//! Every decision the controller makes is published as a [`FollowEvent`] to an [`EventSink`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::DriveDems;
use log::{debug, info, trace, warn};
use serde::Serialize;

use super::{turn::TurnPlan, FollowMode};
use crate::{line_det::LineObservation, odom::OdometryReport};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Receives the controller's events.
pub trait EventSink {
    fn emit(&mut self, event: FollowEvent);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Writes events to the log.
#[derive(Debug, Default)]
pub struct LogSink;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FollowEvent {
    /// The controller entered a new mode.
    ModeEntered(FollowMode),

    /// A fresh observation of the line was taken.
    Observation(LineObservation),

    /// A command was sent to the drive.
    DriveCommanded(DriveDems),

    /// The camera was aimed at a new heading.
    HeadingCommanded { heading_deg: f64 },

    /// A turn towards a detected heading was planned.
    TurnPlanned { heading_deg: f64, plan: TurnPlan },

    /// A scan ended without finding the line.
    ScanExhausted { recovery_cycles: u32 },

    /// A blocking wait was cut short by a stop request.
    WaitInterrupted,

    /// The controller shut down.
    Shutdown {
        mode: FollowMode,
        odometry: Option<OdometryReport>,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EventSink for LogSink {
    fn emit(&mut self, event: FollowEvent) {
        match event {
            FollowEvent::ModeEntered(mode) => info!("FollowCtrl entered {:?}", mode),
            FollowEvent::Observation(obs) => trace!("Line observation: {:?}", obs),
            FollowEvent::DriveCommanded(dems) => debug!(
                "Drive command: {:?} (L {:.1} %, R {:.1} %)",
                dems.intent, dems.left_pct, dems.right_pct
            ),
            FollowEvent::HeadingCommanded { heading_deg } => {
                debug!("Camera heading: {:.1} deg", heading_deg)
            }
            FollowEvent::TurnPlanned { heading_deg, plan } => debug!(
                "Line found at {:.1} deg, turn: {:?} for {:.2} s",
                heading_deg,
                plan.direction,
                plan.duration.as_secs_f64()
            ),
            FollowEvent::ScanExhausted { recovery_cycles } => info!(
                "Line not found in scan, reversing again (recovery cycle {})",
                recovery_cycles
            ),
            FollowEvent::WaitInterrupted => warn!("Pivot interrupted by stop request"),
            FollowEvent::Shutdown { mode, odometry } => {
                info!("FollowCtrl shut down from {:?}", mode);
                if let Some(o) = odometry {
                    info!(
                        "Distance travelled: left {:.1} cm, right {:.1} cm",
                        o.left_cm, o.right_cm
                    );
                }
            }
        }
    }
}
