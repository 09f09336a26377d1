//! # Scan plan
//!
//! The ordered camera headings tried while looking for a lost line.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::ParamsError;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A fixed, non-empty sequence of probe headings with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPlan {
    headings_deg: Vec<f64>,
    index: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ScanPlan {
    /// Create a new plan positioned at the first heading.
    pub fn new(headings_deg: Vec<f64>) -> Result<Self, ParamsError> {
        if headings_deg.is_empty() {
            return Err(ParamsError::EmptyScanPlan);
        }

        Ok(Self {
            headings_deg,
            index: 0,
        })
    }

    /// Move back to the first heading.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The heading currently being probed.
    pub fn current(&self) -> f64 {
        self.headings_deg[self.index]
    }

    /// Move to the next heading.
    ///
    /// Returns `false` if there are no more headings to try, in which case the plan stays on its
    /// final heading until [`ScanPlan::reset`] is called.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.headings_deg.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.headings_deg.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scan_plan_order() {
        let mut plan = ScanPlan::new(vec![45.0, 135.0, 90.0]).unwrap();

        assert_eq!(plan.current(), 45.0);
        assert!(plan.advance());
        assert_eq!(plan.current(), 135.0);
        assert!(plan.advance());
        assert_eq!(plan.current(), 90.0);

        // Exhausted, and stays exhausted
        assert!(!plan.advance());
        assert!(!plan.advance());
        assert_eq!(plan.current(), 90.0);

        plan.reset();
        assert_eq!(plan.current(), 45.0);
        assert!(plan.advance());
    }

    #[test]
    fn test_single_heading() {
        let mut plan = ScanPlan::new(vec![90.0]).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(!plan.advance());
        assert_eq!(plan.current(), 90.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            ScanPlan::new(Vec::new()),
            Err(ParamsError::EmptyScanPlan)
        ));
    }
}
