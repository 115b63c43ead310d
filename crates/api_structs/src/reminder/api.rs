use crate::dtos::{ExecutionLogEntryDTO, ReminderDTO, TimeSlotInput};
use pingbell_domain::{ExecutionLogEntry, PlatformConfig, Reminder, ReminderStats, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub owner: String,
        pub name: String,
        pub platform: String,
        pub webhook_url: String,
        pub message_content: String,
        pub time_slots: Vec<TimeSlotInput>,
        pub days: Vec<String>,
        #[serde(default)]
        pub platform_config: Option<PlatformConfig>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub owner: String,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub platform: Option<String>,
        #[serde(default)]
        pub webhook_url: Option<String>,
        #[serde(default)]
        pub message_content: Option<String>,
        #[serde(default)]
        pub platform_config: Option<PlatformConfig>,
        #[serde(default)]
        pub time_slots: Option<Vec<TimeSlotInput>>,
        #[serde(default)]
        pub days: Option<Vec<String>>,
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_many_reminders {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_ids: Vec<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted_count: i64,
    }
}

pub mod toggle_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Omitting `isActive` flips the current state
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod toggle_time_slot {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
        pub slot_id: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod execute_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub time_slot_id: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub executions: Vec<ExecutionLogEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<ExecutionLogEntry>) -> Self {
            Self {
                executions: entries.into_iter().map(ExecutionLogEntryDTO::new).collect(),
            }
        }
    }
}

pub mod get_execution_history {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub limit: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub history: Vec<ExecutionLogEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<ExecutionLogEntry>) -> Self {
            Self {
                history: entries.into_iter().map(ExecutionLogEntryDTO::new).collect(),
            }
        }
    }
}

pub mod get_reminder_stats {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub owner: String,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub stats: ReminderStats,
    }

    impl APIResponse {
        pub fn new(stats: ReminderStats) -> Self {
            Self { stats }
        }
    }
}
