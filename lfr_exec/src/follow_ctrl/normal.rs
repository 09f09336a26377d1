//! # Normal mode
//!
//! Track the line: drive forward while it is near the center of the frame, pivot towards it when
//! it drifts past the turn threshold, and start recovery when it disappears.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::DriveDems;

use super::{FollowCtrl, FollowCtrlError, StepStatus};

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowCtrl {
    pub(super) fn step_normal(&mut self) -> Result<StepStatus, FollowCtrlError> {
        let obs = self.observe()?;

        if !obs.found {
            self.begin_reversing()?;
            return Ok(StepStatus::Continue);
        }

        let threshold = self.params.turn_threshold_px;
        let dems = if obs.offset_px > threshold {
            DriveDems::pivot_right(self.params.turn_speed_pct)
        } else if obs.offset_px < -threshold {
            DriveDems::pivot_left(self.params.turn_speed_pct)
        } else {
            DriveDems::forward(self.params.base_speed_pct)
        };

        self.command(dems)?;

        Ok(StepStatus::Continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        follow_ctrl::{FollowCtrlParams, FollowMode, FollowState},
        line_det::LineObservation,
        test_utils::Rig,
    };

    #[test]
    fn test_centered_line_drives_forward() {
        let rig = Rig::new();
        let mut ctrl = rig.ctrl(FollowCtrlParams::default());

        for _ in 0..3 {
            rig.sensor.push(LineObservation::found(0));
            assert_eq!(ctrl.step().unwrap(), StepStatus::Continue);
        }

        assert_eq!(rig.drive.commands(), vec![DriveDems::forward(40.0); 3]);
        assert_eq!(rig.sensor.calls(), 3);
        assert_eq!(ctrl.mode(), FollowMode::Normal);
    }

    #[test]
    fn test_offset_pivots_towards_line() {
        let rig = Rig::new();
        let mut ctrl = rig.ctrl(FollowCtrlParams::default());

        rig.sensor.push(LineObservation::found(150));
        ctrl.step().unwrap();
        assert_eq!(rig.drive.last(), Some(DriveDems::pivot_right(50.0)));
        assert_eq!(ctrl.mode(), FollowMode::Normal);

        rig.sensor.push(LineObservation::found(-150));
        ctrl.step().unwrap();
        assert_eq!(rig.drive.last(), Some(DriveDems::pivot_left(50.0)));
        assert_eq!(ctrl.mode(), FollowMode::Normal);
    }

    #[test]
    fn test_threshold_is_inclusive_for_forward() {
        let rig = Rig::new();
        let mut ctrl = rig.ctrl(FollowCtrlParams::default());

        rig.sensor.push(LineObservation::found(80));
        rig.sensor.push(LineObservation::found(-80));
        rig.sensor.push(LineObservation::found(81));
        ctrl.step().unwrap();
        ctrl.step().unwrap();
        ctrl.step().unwrap();

        assert_eq!(
            rig.drive.commands(),
            vec![
                DriveDems::forward(40.0),
                DriveDems::forward(40.0),
                DriveDems::pivot_right(50.0)
            ]
        );
    }

    #[test]
    fn test_lost_line_starts_reversing() {
        let rig = Rig::new();
        let mut ctrl = rig.ctrl(FollowCtrlParams::default());
        rig.clock.advance_secs(3.0);

        rig.sensor.push(LineObservation::not_found());
        ctrl.step().unwrap();

        assert_eq!(rig.drive.commands(), vec![DriveDems::reverse(30.0)]);
        assert_eq!(
            ctrl.state(),
            FollowState::Reversing {
                since: std::time::Duration::from_secs(3)
            }
        );
        assert_eq!(rig.sink.modes(), vec![FollowMode::Reversing]);
    }
}
