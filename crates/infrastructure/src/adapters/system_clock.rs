//! System clock adapter

use chrono::{DateTime, Utc};
use tstai_application::ports::Clock;

/// Wall clock used to stamp run logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ids_from_system_clock_are_well_formed() {
        let id = tstai_domain::RunLog::run_id(SystemClock::new().now());
        assert!(id.starts_with("test-run-20"));
        assert_eq!(id.len(), "test-run-YYYY-MM-DDTHH-MM-SS".len());
    }
}
