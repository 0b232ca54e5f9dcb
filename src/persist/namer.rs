//! Unique filename generation.

use chrono::NaiveDateTime;

/// Generates session-unique JPEG filenames.
///
/// Names follow `{yyyyMMdd_HHmmss}_{NNN}.jpg`: the session-start
/// timestamp fixes the prefix, the zero-padded 3-digit counter starts
/// at 000 and never repeats. Counts beyond 999 widen the field and
/// remain distinct.
#[derive(Debug, Clone)]
pub struct FileNamer {
    session_start: NaiveDateTime,
    counter: u32,
}

impl FileNamer {
    /// Creates a namer anchored at the given session start time.
    pub fn new(session_start: NaiveDateTime) -> Self {
        Self {
            session_start,
            counter: 0,
        }
    }

    /// Returns the next filename and advances the counter.
    pub fn next_name(&mut self) -> String {
        let name = format!(
            "{}_{:03}.jpg",
            self.session_start.format("%Y%m%d_%H%M%S"),
            self.counter
        );
        self.counter += 1;
        name
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u32 {
        self.counter
    }
}
