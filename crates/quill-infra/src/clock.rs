//! System clock - the production `Clock` implementation.

use chrono::{DateTime, Utc};

use quill_core::ports::Clock;

/// Wall-clock time. Tests substitute a fixed clock instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
