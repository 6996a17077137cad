use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Danger,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Distinguishes messages with identical text so a timer only dismisses its own.
    pub id: u64,
    pub message: String,
    pub level: Level,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(id: u64, message: impl Into<String>, level: Level, ttl: Duration) -> Self {
        Self {
            id,
            message: message.into(),
            level,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// `None` when the TTL is too large to represent; such a notice never expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.created_at.checked_add(self.ttl)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let notice = Notification::new(1, "ok", Level::Success, Duration::from_millis(50));
        assert!(!notice.is_expired(notice.created_at));
        assert!(notice.is_expired(notice.created_at + Duration::from_millis(50)));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let notice = Notification::new(1, "ok", Level::Info, Duration::MAX);
        assert_eq!(notice.expires_at(), None);
        assert!(!notice.is_expired(Instant::now() + Duration::from_secs(3600)));
    }
}
