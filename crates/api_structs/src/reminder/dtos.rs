use pingbell_domain::{
    ExecutionLogEntry, ExecutionStatus, Platform, PlatformConfig, Reminder, TimeSlot, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner: String,
    pub name: String,
    pub platform: Platform,
    pub webhook_url: String,
    pub message_content: String,
    pub time_slots: Vec<TimeSlotDTO>,
    pub days: Vec<String>,
    pub is_active: bool,
    pub platform_config: PlatformConfig,
    pub execution_count: i64,
    pub last_execution_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub next_runs: Vec<i64>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            owner: reminder.owner,
            name: reminder.name,
            platform: reminder.platform,
            webhook_url: reminder.webhook_url,
            message_content: reminder.message_content,
            time_slots: reminder.time_slots.into_iter().map(TimeSlotDTO::new).collect(),
            days: reminder.days.into(),
            is_active: reminder.is_active,
            platform_config: reminder.platform_config,
            execution_count: reminder.execution_count,
            last_execution_time: reminder.last_execution_time,
            created_at: reminder.created_at,
            updated_at: reminder.updated_at,
            next_runs: reminder.next_runs,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDTO {
    pub id: String,
    pub time: String,
    pub is_active: bool,
    pub description: Option<String>,
}

impl TimeSlotDTO {
    pub fn new(slot: TimeSlot) -> Self {
        Self {
            id: slot.id,
            time: slot.time.to_string(),
            is_active: slot.is_active,
            description: slot.description,
        }
    }
}

/// Incoming time slot as the UI sends it. The `time` string and the day
/// codes are parsed and validated by the usecase, not by serde, so the
/// caller gets a descriptive error instead of a deserialization failure.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotInput {
    #[serde(default)]
    pub id: Option<String>,
    pub time: String,
    #[serde(default = "bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn bool_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntryDTO {
    pub id: ID,
    pub reminder_id: ID,
    pub time_slot_id: String,
    pub status: ExecutionStatus,
    pub executed_at: i64,
    pub error_message: Option<String>,
    pub response_status: Option<u16>,
}

impl ExecutionLogEntryDTO {
    pub fn new(entry: ExecutionLogEntry) -> Self {
        Self {
            id: entry.id,
            reminder_id: entry.reminder_id,
            time_slot_id: entry.time_slot_id,
            status: entry.status,
            executed_at: entry.executed_at,
            error_message: entry.error_message,
            response_status: entry.response_status,
        }
    }
}
