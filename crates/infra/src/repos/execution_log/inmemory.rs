use super::IExecutionLogRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use pingbell_domain::{ExecutionLogEntry, ID};
use std::sync::Mutex;

pub struct InMemoryExecutionLogRepo {
    entries: Mutex<Vec<ExecutionLogEntry>>,
}

impl InMemoryExecutionLogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryExecutionLogRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IExecutionLogRepo for InMemoryExecutionLogRepo {
    async fn insert(&self, entry: &ExecutionLogEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID, limit: usize) -> Vec<ExecutionLogEntry> {
        let mut entries = find_by(&self.entries, |entry: &ExecutionLogEntry| {
            entry.reminder_id == *reminder_id
        });
        entries.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        entries.truncate(limit);
        entries
    }

    async fn find_by_reminders(&self, reminder_ids: &[ID]) -> Vec<ExecutionLogEntry> {
        find_by(&self.entries, |entry: &ExecutionLogEntry| {
            reminder_ids.contains(&entry.reminder_id)
        })
    }

    async fn delete_by_reminders(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.entries, |entry: &ExecutionLogEntry| {
            reminder_ids.contains(&entry.reminder_id)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_returns_history_most_recent_first_and_capped() {
        let repo = InMemoryExecutionLogRepo::new();
        let reminder_id = ID::default();
        for ts in &[100, 300, 200] {
            let entry =
                ExecutionLogEntry::success(reminder_id.clone(), "slot_a".into(), *ts, Some(200));
            repo.insert(&entry).await.unwrap();
        }

        let history = repo.find_by_reminder(&reminder_id, 2).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].executed_at, 300);
        assert_eq!(history[1].executed_at, 200);
    }

    #[tokio::test]
    async fn it_purges_entries_alongside_their_reminders() {
        let repo = InMemoryExecutionLogRepo::new();
        let keep = ID::default();
        let purge = ID::default();
        repo.insert(&ExecutionLogEntry::success(keep.clone(), "slot_a".into(), 1, Some(200)))
            .await
            .unwrap();
        repo.insert(&ExecutionLogEntry::failed(
            purge.clone(),
            "slot_b".into(),
            2,
            Some("boom".into()),
            Some(500),
        ))
        .await
        .unwrap();

        let res = repo.delete_by_reminders(&[purge.clone()]).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        assert_eq!(repo.find_by_reminder(&purge, 10).await.len(), 0);
        assert_eq!(repo.find_by_reminder(&keep, 10).await.len(), 1);
    }
}
