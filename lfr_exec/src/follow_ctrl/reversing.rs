//! # Reversing mode

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::DriveDems;
use std::time::Duration;

use super::{FollowCtrl, FollowCtrlError, FollowState, StepStatus};

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowCtrl {
    /// Keep backing up until the reverse duration has elapsed, then stop and aim the camera at
    /// the first heading of the scan plan.
    pub(super) fn step_reversing(&mut self, since: Duration) -> Result<StepStatus, FollowCtrlError> {
        if self.elapsed_since(since) < self.params.reverse_duration() {
            return Ok(StepStatus::Continue);
        }

        self.command(DriveDems::stop())?;

        self.scan_plan.reset();
        let heading_deg = self.scan_plan.current();
        self.aim(heading_deg)?;

        let probe_since = self.clock.now();
        self.enter(FollowState::Scanning { probe_since });

        Ok(StepStatus::Continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        follow_ctrl::{FollowCtrlParams, FollowMode},
        line_det::LineObservation,
        test_utils::Rig,
    };

    #[test]
    fn test_reverse_then_scan() {
        let rig = Rig::new();
        let mut ctrl = rig.ctrl(FollowCtrlParams::default());

        rig.sensor.push(LineObservation::not_found());
        ctrl.step().unwrap();
        rig.drive.clear();

        // Still reversing, nothing new is commanded or observed
        rig.clock.advance(Duration::from_millis(300));
        ctrl.step().unwrap();
        assert!(rig.drive.commands().is_empty());
        assert!(rig.heading.angles().is_empty());
        assert_eq!(rig.sensor.calls(), 1);
        assert_eq!(ctrl.mode(), FollowMode::Reversing);

        rig.clock.advance(Duration::from_millis(200));
        ctrl.step().unwrap();
        assert_eq!(rig.drive.commands(), vec![DriveDems::stop()]);
        assert_eq!(rig.heading.angles(), vec![45.0]);
        assert_eq!(
            ctrl.state(),
            FollowState::Scanning {
                probe_since: Duration::from_millis(500)
            }
        );
        assert_eq!(rig.sensor.calls(), 1);
    }
}
