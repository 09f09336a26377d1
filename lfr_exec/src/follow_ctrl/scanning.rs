//! # Scanning mode
//!
//! The rover is stationary while the camera is aimed at each heading of the scan plan in turn.
//! Each heading is held for the dwell time before a single observation is taken.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::Duration;

use super::{FollowCtrl, FollowCtrlError, FollowEvent, FollowState, StepStatus};

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowCtrl {
    pub(super) fn step_scanning(
        &mut self,
        probe_since: Duration,
    ) -> Result<StepStatus, FollowCtrlError> {
        if self.elapsed_since(probe_since) < self.params.scan_dwell() {
            return Ok(StepStatus::Continue);
        }

        let obs = self.observe()?;

        if obs.found {
            self.recovery_cycles = 0;
            let heading_deg = self.scan_plan.current();
            self.enter(FollowState::Turning { heading_deg });
        } else if self.scan_plan.advance() {
            let heading_deg = self.scan_plan.current();
            self.aim(heading_deg)?;
            let probe_since = self.clock.now();
            self.enter(FollowState::Scanning { probe_since });
        } else {
            self.recovery_cycles += 1;
            self.sink.emit(FollowEvent::ScanExhausted {
                recovery_cycles: self.recovery_cycles,
            });

            if let Some(max) = self.params.max_recovery_cycles {
                if self.recovery_cycles > max {
                    return Err(FollowCtrlError::LineLost(self.recovery_cycles));
                }
            }

            self.begin_reversing()?;
        }

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
    use eqpt_if::DriveDems;

    /// Step a fresh controller from `Normal` into `Scanning` at the first heading.
    fn into_scanning(rig: &Rig, params: FollowCtrlParams) -> FollowCtrl {
        let mut ctrl = rig.ctrl(params);
        rig.sensor.push(LineObservation::not_found());
        ctrl.step().unwrap();
        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        assert_eq!(ctrl.mode(), FollowMode::Scanning);
        rig.drive.clear();
        rig.heading.clear();
        ctrl
    }

    #[test]
    fn test_dwell_before_observing() {
        let rig = Rig::new();
        let mut ctrl = into_scanning(&rig, FollowCtrlParams::default());
        let calls = rig.sensor.calls();

        rig.clock.advance_secs(0.25);
        ctrl.step().unwrap();
        ctrl.step().unwrap();
        assert_eq!(rig.sensor.calls(), calls);

        rig.clock.advance_secs(0.25);
        ctrl.step().unwrap();
        assert_eq!(rig.sensor.calls(), calls + 1);
    }

    #[test]
    fn test_probes_in_order_then_reverses() {
        let rig = Rig::new();
        let mut ctrl = into_scanning(&rig, FollowCtrlParams::default());

        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        assert_eq!(rig.heading.angles(), vec![135.0]);
        assert_eq!(ctrl.mode(), FollowMode::Scanning);

        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        assert_eq!(rig.heading.angles(), vec![135.0, 90.0]);

        // No drive commands while probing
        assert!(rig.drive.commands().is_empty());

        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        assert_eq!(rig.drive.commands(), vec![DriveDems::reverse(30.0)]);
        assert_eq!(
            ctrl.state(),
            FollowState::Reversing {
                since: Duration::from_secs(2)
            }
        );
        assert_eq!(ctrl.recovery_cycles(), 1);

        // The next scan starts again from the first heading
        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        assert_eq!(rig.heading.last(), Some(45.0));
        assert_eq!(ctrl.mode(), FollowMode::Scanning);
    }

    #[test]
    fn test_found_at_probe_heading() {
        let rig = Rig::new();
        let mut ctrl = into_scanning(&rig, FollowCtrlParams::default());

        // Not at 45, found at 135
        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        rig.sensor.push(LineObservation::found(-20));
        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();

        assert_eq!(ctrl.state(), FollowState::Turning { heading_deg: 135.0 });
        assert_eq!(
            rig.sink.modes(),
            vec![FollowMode::Reversing, FollowMode::Scanning, FollowMode::Turning]
        );
    }

    #[test]
    fn test_recovery_cap() {
        let rig = Rig::new();
        let params = FollowCtrlParams {
            max_recovery_cycles: Some(1),
            ..Default::default()
        };
        let mut ctrl = into_scanning(&rig, params);

        // First exhausted scan is allowed
        for _ in 0..3 {
            rig.clock.advance_secs(0.5);
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.mode(), FollowMode::Reversing);

        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        for _ in 0..2 {
            rig.clock.advance_secs(0.5);
            ctrl.step().unwrap();
        }

        // Second one is not
        rig.clock.advance_secs(0.5);
        assert!(matches!(ctrl.step(), Err(FollowCtrlError::LineLost(2))));
    }

    #[test]
    fn test_found_line_resets_recovery_count() {
        let rig = Rig::new();
        let mut ctrl = into_scanning(&rig, FollowCtrlParams::default());

        for _ in 0..3 {
            rig.clock.advance_secs(0.5);
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.recovery_cycles(), 1);

        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();
        rig.sensor.push(LineObservation::found(0));
        rig.clock.advance_secs(0.5);
        ctrl.step().unwrap();

        assert_eq!(ctrl.state(), FollowState::Turning { heading_deg: 45.0 });
        assert_eq!(ctrl.recovery_cycles(), 0);
    }
}
