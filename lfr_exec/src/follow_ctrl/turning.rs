//! # Turning mode

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{heading::CENTER_HEADING_DEG, DriveDems};
use util::time::WaitOutcome;

use super::{FollowCtrl, FollowCtrlError, FollowEvent, FollowState, StepStatus, TurnPlan};

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowCtrl {
    /// Pivot the rover to face the heading at which the line was found.
    ///
    /// The pivot is held with a blocking wait, which returns early if a stop is requested. In
    /// that case [`StepStatus::Interrupted`] is returned and nothing else is commanded.
    pub(super) fn step_turning(&mut self, heading_deg: f64) -> Result<StepStatus, FollowCtrlError> {
        let plan = TurnPlan::from_heading(heading_deg, self.params.turn_rate_deg_s);
        self.sink.emit(FollowEvent::TurnPlanned { heading_deg, plan });

        let direction = match plan.direction {
            Some(d) => d,
            None => {
                // Line is straight ahead and the camera is already centered
                self.enter(FollowState::Normal);
                return Ok(StepStatus::Continue);
            }
        };

        self.command(direction.dems(self.params.turn_speed_pct))?;

        if let WaitOutcome::Interrupted = self.clock.wait(plan.duration) {
            self.sink.emit(FollowEvent::WaitInterrupted);
            return Ok(StepStatus::Interrupted);
        }

        self.command(DriveDems::stop())?;
        self.aim(CENTER_HEADING_DEG)?;
        self.enter(FollowState::Normal);

        Ok(StepStatus::Continue)
    }
}
