//! Delay abstraction for retry backoff and capture pacing.
//!
//! Mount retries and inter-capture pacing both block the single
//! execution context for a configured duration. Injecting the delay
//! lets the retry and pacing logic be tested without real time passing.

use std::cell::RefCell;
use std::time::Duration;

/// Trait for blocking delays.
pub trait Delay {
    /// Blocks the calling thread for the given duration.
    fn wait(&self, duration: Duration);
}

/// Production delay backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl ThreadDelay {
    /// Creates a new thread-sleep delay.
    pub fn new() -> Self {
        Self
    }
}

impl Delay for ThreadDelay {
    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Test delay that records requested durations instead of sleeping.
///
/// Single-threaded by design, matching the execution model of the
/// capture workflow.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    waits: RefCell<Vec<Duration>>,
}

impl RecordingDelay {
    /// Creates a new recording delay with no recorded waits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the durations requested so far, in order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }

    /// Returns the number of waits requested so far.
    pub fn count(&self) -> usize {
        self.waits.borrow().len()
    }

    /// Returns the total time that would have been slept.
    pub fn total(&self) -> Duration {
        self.waits.borrow().iter().sum()
    }
}

impl Delay for RecordingDelay {
    fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}
