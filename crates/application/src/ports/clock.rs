//! Clock port for time-related operations

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Log file names and timestamps are derived from it, so tests can pin it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
