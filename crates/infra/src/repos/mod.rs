mod execution_log;
mod reminder;
mod shared;

pub use execution_log::IExecutionLogRepo;
pub use reminder::{IReminderRepo, ReminderSubscription};
pub use shared::repo::DeleteResult;

use execution_log::InMemoryExecutionLogRepo;
use reminder::InMemoryReminderRepo;
use std::sync::Arc;

/// The store gateway. Two fixed document collections back the whole
/// system: reminders and their execution log.
#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub execution_logs: Arc<dyn IExecutionLogRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            execution_logs: Arc::new(InMemoryExecutionLogRepo::new()),
        }
    }
}
