mod inmemory;

pub use inmemory::InMemoryReminderRepo;

use crate::repos::shared::repo::DeleteResult;
use pingbell_domain::{Reminder, ID};
use tokio::sync::broadcast;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All reminders for one owner, newest first
    async fn find_by_owner(&self, owner: &str) -> Vec<Reminder>;
    /// One-shot dispatcher query: active reminders whose day set contains
    /// `day_code`. A store failure here is fatal to the whole tick.
    async fn find_active_by_day(&self, day_code: u32) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn delete_many(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult>;
    /// Bumps `execution_count` and `last_execution_time` as one atomic
    /// read-increment-write, so overlapping ticks or a concurrent manual
    /// execution never lose an increment.
    async fn increment_execution(&self, reminder_id: &ID, executed_at: i64) -> anyhow::Result<()>;
    /// Live query for the UI: current snapshot plus a change feed. The
    /// dispatcher must use `find_active_by_day` instead, never this.
    async fn watch_by_owner(&self, owner: &str) -> ReminderSubscription;
}

/// Handle for one live-query registration. The subscriber owns it and
/// releases the listener by calling `unsubscribe` or dropping it.
pub struct ReminderSubscription {
    snapshot: Vec<Reminder>,
    receiver: broadcast::Receiver<Vec<Reminder>>,
}

impl ReminderSubscription {
    pub(crate) fn new(
        snapshot: Vec<Reminder>,
        receiver: broadcast::Receiver<Vec<Reminder>>,
    ) -> Self {
        Self { snapshot, receiver }
    }

    /// The owner's reminders at subscription time, newest first
    pub fn snapshot(&self) -> &[Reminder] {
        &self.snapshot
    }

    /// The next full result set after a change, or `None` once the store
    /// is gone. A lagged receiver skips to the most recent snapshot.
    pub async fn next_change(&mut self) -> Option<Vec<Reminder>> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}
