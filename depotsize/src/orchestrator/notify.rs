//! User-visible error notifications

use std::collections::BTreeMap;

use parking_lot::Mutex;

/// Key under which a strategy failure is surfaced.
///
/// Repeated failures of the same strategy for the same game overwrite the
/// previous notification instead of adding another.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationKey {
    pub game_id: String,
    pub strategy: String,
}

impl NotificationKey {
    pub fn new(game_id: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            strategy: strategy.into(),
        }
    }
}

/// A surfaced strategy failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub key: NotificationKey,
    /// Game title at the time of the failure.
    pub game_name: String,
    pub message: String,
}

/// Sink for strategy failures.
pub trait ErrorNotifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory notifier the host drains to show errors.
#[derive(Debug, Default)]
pub struct NotificationBoard {
    entries: Mutex<BTreeMap<NotificationKey, Notification>>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current notifications, ordered by key.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().values().cloned().collect()
    }

    /// Remove and return all notifications.
    pub fn drain(&self) -> Vec<Notification> {
        let taken = std::mem::take(&mut *self.entries.lock());
        taken.into_values().collect()
    }

    /// Dismiss one notification.
    pub fn dismiss(&self, key: &NotificationKey) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ErrorNotifier for NotificationBoard {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .insert(notification.key.clone(), notification);
    }
}
