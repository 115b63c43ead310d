mod inmemory;

pub use inmemory::InMemoryExecutionLogRepo;

use crate::repos::shared::repo::DeleteResult;
use pingbell_domain::{ExecutionLogEntry, ID};

/// Append-only audit trail of delivery attempts. Entries are never updated;
/// the only deletion path is the bulk purge that accompanies a reminder's
/// deletion.
#[async_trait::async_trait]
pub trait IExecutionLogRepo: Send + Sync {
    async fn insert(&self, entry: &ExecutionLogEntry) -> anyhow::Result<()>;
    /// A reminder's history, most recent first, capped at `limit`
    async fn find_by_reminder(&self, reminder_id: &ID, limit: usize) -> Vec<ExecutionLogEntry>;
    async fn find_by_reminders(&self, reminder_ids: &[ID]) -> Vec<ExecutionLogEntry>;
    async fn delete_by_reminders(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}
