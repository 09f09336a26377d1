//! General time utility functions
//!
//! Also provides the monotonic [`Clock`] abstraction used by cyclic modules, together with the
//! [`StopSignal`] which allows an out-of-band stop request to cut any blocking wait short.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Longest single sleep taken by [`SysClock::wait`] before the stop signal is checked again.
const WAIT_SLICE: Duration = Duration::from_millis(10);

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A monotonic clock able to perform blocking waits.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Block for the given duration, unless a stop is requested first.
    fn wait(&mut self, duration: Duration) -> WaitOutcome;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Flag raised when the process is asked to stop.
///
/// Clones share the same underlying flag, so one can be handed to a signal handler while the
/// others are polled by the main loop and by [`SysClock`].
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

/// [`Clock`] backed by the system's monotonic clock.
#[derive(Debug, Clone)]
pub struct SysClock {
    start: Instant,
    stop: StopSignal,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Result of a blocking wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration elapsed.
    Elapsed,

    /// The wait was cut short by a stop request.
    Interrupted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst)
    }

    /// Returns true once a stop has been requested.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl SysClock {
    /// Create a new clock whose waits are interrupted by `stop`.
    pub fn new(stop: StopSignal) -> Self {
        Self {
            start: Instant::now(),
            stop,
        }
    }
}

impl Clock for SysClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        wait_unless_stopped(duration, &self.stop)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Sleep for `duration`, returning early if `stop` is raised before or during the sleep.
pub fn wait_unless_stopped(duration: Duration, stop: &StopSignal) -> WaitOutcome {
    let end = Instant::now() + duration;

    loop {
        if stop.is_raised() {
            return WaitOutcome::Interrupted
        }

        let now = Instant::now();
        if now >= end {
            return WaitOutcome::Elapsed
        }

        thread::sleep(WAIT_SLICE.min(end - now));
    }
}

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)),
            Some(1.5)
        );
        assert_eq!(duration_to_seconds(chrono::Duration::max_value()), None);
    }

    #[test]
    fn test_stop_signal_shared_between_clones() {
        let stop = StopSignal::new();
        let handler_copy = stop.clone();

        assert!(!stop.is_raised());
        handler_copy.raise();
        assert!(stop.is_raised());
    }

    #[test]
    fn test_sys_clock_wait_elapses() {
        let mut clock = SysClock::new(StopSignal::new());
        let before = clock.now();

        assert_eq!(clock.wait(Duration::from_millis(20)), WaitOutcome::Elapsed);
        assert!(clock.now() - before >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_already_stopped() {
        let stop = StopSignal::new();
        stop.raise();

        let start = Instant::now();
        assert_eq!(
            wait_unless_stopped(Duration::from_secs(10), &stop),
            WaitOutcome::Interrupted
        );
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sys_clock_wait_interrupted() {
        let stop = StopSignal::new();
        let mut clock = SysClock::new(stop.clone());

        let raiser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stop.raise();
        });

        let start = Instant::now();
        assert_eq!(clock.wait(Duration::from_secs(10)), WaitOutcome::Interrupted);
        assert!(start.elapsed() < Duration::from_secs(5));

        raiser.join().unwrap();
    }
}
