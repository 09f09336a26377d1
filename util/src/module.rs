//! Cyclic module interface
//!
//! Processing stages run by `lfr_exec` (for example line detection) implement [`State`], so that
//! the executable can set them up from a parameter file and then run them once per cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A processing stage with its own parameters and internal state.
pub trait State {
    /// What the stage needs to set itself up, usually the name of its parameter file.
    type InitData;
    type InitError;

    /// Input consumed by one processing cycle.
    type InputData;

    /// Result of one processing cycle.
    type OutputData;

    /// Diagnostic information produced alongside the output.
    type StatusReport;
    type ProcError;

    /// Set the stage up. Called once, before the first call to [`State::proc`].
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Run one processing cycle on `input_data`.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
