//! Per-invocation context passed through the dashboard pipeline.

use chrono::{DateTime, Utc};

/// Who is looking at the dashboard, and when.
///
/// `now` is captured once so every filter in a render sees the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub now: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            now,
        }
    }

    /// A session starting at the current wall-clock time.
    pub fn start(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_keeps_fields() {
        let now = Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap();
        let session = Session::new("u1", now);
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.now, now);
    }

    #[test]
    fn start_uses_current_time() {
        let before = Utc::now();
        let session = Session::start("u1");
        assert!(session.now >= before);
        assert!(session.now <= Utc::now());
    }
}
