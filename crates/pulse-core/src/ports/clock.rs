use chrono::{DateTime, Utc};

/// Source of the current time for every expiration check.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
