use chrono::{DateTime, Utc};

/// Time source injected into the search engine and the cache.
/// Production uses `SystemClock`; tests substitute a manual clock so TTL and
/// relative-time behavior can be asserted deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
