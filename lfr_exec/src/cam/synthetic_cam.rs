//! # Synthetic camera

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{EqptError, Frame, FrameSource};
use serde::{Deserialize, Serialize};

use crate::line_det::synthetic::{blank_frame, vertical_bar_frame};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Renders a dark vertical line on a light floor, or just the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticCam {
    pub width: u32,
    pub height: u32,

    /// Horizontal position of the line's center in pixels, `None` for no line.
    pub line_x: Option<i32>,

    /// Units: pixels
    pub line_width: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SyntheticCam {
    pub fn new(width: u32, height: u32, line_x: Option<i32>, line_width: u32) -> Self {
        Self {
            width,
            height,
            line_x,
            line_width,
        }
    }

    pub fn set_line_x(&mut self, line_x: Option<i32>) {
        self.line_x = line_x;
    }
}

impl FrameSource for SyntheticCam {
    fn capture(&mut self) -> Result<Frame, EqptError> {
        Ok(match self.line_x {
            Some(x) => vertical_bar_frame(self.width, self.height, x, self.line_width),
            None => blank_frame(self.width, self.height),
        })
    }
}
