use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Every visibility comparison takes its "now" from an injected clock so
/// listings can be tested against fixed timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
