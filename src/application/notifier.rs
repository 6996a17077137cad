use crate::domain::notification::{Level, Notification};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Holds the single visible notification and dismisses it after its TTL.
///
/// Each message gets one deferred tokio timer. The timer only clears the slot
/// if it still holds the message it was scheduled for.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Option<Notification>>>,
    next_id: u64,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::default(),
            next_id: 0,
            ttl,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, level: Level) {
        self.next_id += 1;
        let notice = Notification::new(self.next_id, message, level, self.ttl);
        let id = notice.id;
        *lock(&self.slot) = Some(notice);

        // Outside a runtime the slot still expires lazily in `current`.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let slot = Arc::clone(&self.slot);
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                let mut guard = lock(&slot);
                if guard.as_ref().is_some_and(|n| n.id == id) {
                    *guard = None;
                }
            });
        }
    }

    /// The visible notification, if any and not yet expired.
    pub fn current(&self) -> Option<Notification> {
        lock(&self.slot)
            .as_ref()
            .filter(|n| !n.is_expired(Instant::now()))
            .cloned()
    }

    pub fn dismiss(&self) {
        *lock(&self.slot) = None;
    }
}

fn lock(slot: &Mutex<Option<Notification>>) -> MutexGuard<'_, Option<Notification>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
