use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// Immutable audit record of one delivery attempt for one `TimeSlot`.
/// Written for both outcomes, never updated, only bulk-purged when the
/// owning reminder is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntry {
    pub id: ID,
    pub reminder_id: ID,
    pub time_slot_id: String,
    pub status: ExecutionStatus,
    pub executed_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<u16>,
}

impl ExecutionLogEntry {
    pub fn success(
        reminder_id: ID,
        time_slot_id: String,
        executed_at: i64,
        response_status: Option<u16>,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            time_slot_id,
            status: ExecutionStatus::Success,
            executed_at,
            error_message: None,
            response_status,
        }
    }

    pub fn failed(
        reminder_id: ID,
        time_slot_id: String,
        executed_at: i64,
        error_message: Option<String>,
        response_status: Option<u16>,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            time_slot_id,
            status: ExecutionStatus::Failed,
            executed_at,
            error_message,
            response_status,
        }
    }
}

impl Entity for ExecutionLogEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
