//! Wall clock for the importer binary.

use chrono::{DateTime, Utc};
use vfimport_application::Clock;

/// Reads the operating system clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
