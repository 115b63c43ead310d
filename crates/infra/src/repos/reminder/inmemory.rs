use super::{IReminderRepo, ReminderSubscription};
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use anyhow::anyhow;
use pingbell_domain::{Reminder, ID};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

const WATCH_CHANNEL_CAPACITY: usize = 16;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    watchers: Mutex<HashMap<String, broadcast::Sender<Vec<Reminder>>>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    fn owner_snapshot(&self, owner: &str) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |reminder: &Reminder| {
            reminder.owner == owner
        });
        reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reminders
    }

    // Pushes a fresh snapshot to the owner's live-query listeners and
    // prunes the channel once the last subscription is gone
    fn publish(&self, owner: &str) {
        let snapshot = self.owner_snapshot(owner);
        let mut watchers = self.watchers.lock().unwrap();
        if let Some(sender) = watchers.get(owner) {
            if sender.send(snapshot).is_err() {
                watchers.remove(owner);
            }
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        self.publish(&reminder.owner);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        self.publish(&reminder.owner);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_owner(&self, owner: &str) -> Vec<Reminder> {
        self.owner_snapshot(owner)
    }

    async fn find_active_by_day(&self, day_code: u32) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |reminder: &Reminder| {
            reminder.is_active && reminder.days.contains(day_code)
        }))
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let deleted = delete(reminder_id, &self.reminders);
        if let Some(reminder) = &deleted {
            self.publish(&reminder.owner);
        }
        deleted
    }

    async fn delete_many(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let owners: Vec<String> = find_by(&self.reminders, |reminder: &Reminder| {
            reminder_ids.contains(&reminder.id)
        })
        .into_iter()
        .map(|reminder| reminder.owner)
        .collect();

        let res = delete_by(&self.reminders, |reminder: &Reminder| {
            reminder_ids.contains(&reminder.id)
        });
        for owner in owners {
            self.publish(&owner);
        }
        Ok(res)
    }

    async fn increment_execution(&self, reminder_id: &ID, executed_at: i64) -> anyhow::Result<()> {
        let updated = update_one(reminder_id, &self.reminders, |reminder: &mut Reminder| {
            reminder.execution_count += 1;
            reminder.last_execution_time = Some(executed_at);
        });
        if !updated {
            return Err(anyhow!("No reminder with id: {}", reminder_id));
        }
        Ok(())
    }

    async fn watch_by_owner(&self, owner: &str) -> ReminderSubscription {
        let snapshot = self.owner_snapshot(owner);
        let mut watchers = self.watchers.lock().unwrap();
        let receiver = match watchers.get(owner) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = broadcast::channel(WATCH_CHANNEL_CAPACITY);
                watchers.insert(owner.to_string(), sender);
                receiver
            }
        };
        ReminderSubscription::new(snapshot, receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingbell_domain::{DaySet, Platform, PlatformConfig, TimeSlot};

    fn reminder(owner: &str, created_at: i64, is_active: bool, days: &[u32]) -> Reminder {
        Reminder {
            id: Default::default(),
            owner: owner.into(),
            name: "r".into(),
            platform: Platform::Slack,
            webhook_url: "https://hooks.slack.com/services/T/B/X".into(),
            message_content: "hi".into(),
            time_slots: vec![TimeSlot {
                id: TimeSlot::assign_id(),
                time: "09:00".parse().unwrap(),
                is_active: true,
                description: None,
            }],
            days: DaySet::from_codes(days).unwrap(),
            is_active,
            platform_config: PlatformConfig::Slack,
            execution_count: 0,
            last_execution_time: None,
            created_at,
            updated_at: created_at,
            next_runs: vec![0],
        }
    }

    #[tokio::test]
    async fn it_orders_owner_reminders_newest_first() {
        let repo = InMemoryReminderRepo::new();
        repo.insert(&reminder("alice", 100, true, &[1])).await.unwrap();
        repo.insert(&reminder("alice", 300, true, &[1])).await.unwrap();
        repo.insert(&reminder("bob", 200, true, &[1])).await.unwrap();

        let reminders = repo.find_by_owner("alice").await;
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].created_at, 300);
        assert_eq!(reminders[1].created_at, 100);
    }

    #[tokio::test]
    async fn it_filters_active_reminders_by_day() {
        let repo = InMemoryReminderRepo::new();
        repo.insert(&reminder("alice", 1, true, &[1, 2])).await.unwrap();
        repo.insert(&reminder("alice", 2, false, &[1])).await.unwrap();
        repo.insert(&reminder("alice", 3, true, &[6])).await.unwrap();

        let due_monday = repo.find_active_by_day(1).await.unwrap();
        assert_eq!(due_monday.len(), 1);
        assert_eq!(due_monday[0].created_at, 1);

        assert!(repo.find_active_by_day(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_increments_executions_without_losing_updates() {
        let repo = InMemoryReminderRepo::new();
        let r = reminder("alice", 1, true, &[1]);
        repo.insert(&r).await.unwrap();

        for ts in 1..=5 {
            repo.increment_execution(&r.id, ts * 1000).await.unwrap();
        }

        let stored = repo.find(&r.id).await.unwrap();
        assert_eq!(stored.execution_count, 5);
        assert_eq!(stored.last_execution_time, Some(5000));
    }

    #[tokio::test]
    async fn it_fails_to_increment_unknown_reminders() {
        let repo = InMemoryReminderRepo::new();
        assert!(repo.increment_execution(&ID::default(), 0).await.is_err());
    }

    #[tokio::test]
    async fn watchers_receive_snapshots_on_changes() {
        let repo = InMemoryReminderRepo::new();
        repo.insert(&reminder("alice", 100, true, &[1])).await.unwrap();

        let mut subscription = repo.watch_by_owner("alice").await;
        assert_eq!(subscription.snapshot().len(), 1);

        repo.insert(&reminder("alice", 200, true, &[1])).await.unwrap();
        let snapshot = subscription.next_change().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].created_at, 200);

        // Changes to another owner are not delivered here
        repo.insert(&reminder("bob", 300, true, &[1])).await.unwrap();
        repo.insert(&reminder("alice", 400, true, &[1])).await.unwrap();
        let snapshot = subscription.next_change().await.unwrap();
        assert_eq!(snapshot.len(), 3);

        subscription.unsubscribe();
    }
}
