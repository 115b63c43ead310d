use crate::reminder::Reminder;
use crate::schedule::NEXT_RUN_SENTINEL;
use serde::{Deserialize, Serialize};

/// Read-only dashboard numbers derived from one owner's reminder set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub total_executions: i64,
    pub today_executions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<i64>,
}

/// The single soonest upcoming run across all active reminders and active
/// slots. Sentinel entries and past timestamps never qualify.
pub fn next_upcoming_run(reminders: &[Reminder], now_ts: i64) -> Option<i64> {
    reminders
        .iter()
        .filter(|reminder| reminder.is_active)
        .flat_map(|reminder| reminder.time_slots.iter().zip(reminder.next_runs.iter()))
        .filter(|(slot, next_run)| {
            slot.is_active && **next_run != NEXT_RUN_SENTINEL && **next_run > now_ts
        })
        .map(|(_, next_run)| *next_run)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, PlatformConfig};
    use crate::reminder::{DaySet, TimeSlot};

    fn reminder(is_active: bool, slots: Vec<(bool, i64)>) -> Reminder {
        let (time_slots, next_runs): (Vec<TimeSlot>, Vec<i64>) = slots
            .into_iter()
            .map(|(slot_active, next_run)| {
                (
                    TimeSlot {
                        id: TimeSlot::assign_id(),
                        time: "09:00".parse().unwrap(),
                        is_active: slot_active,
                        description: None,
                    },
                    next_run,
                )
            })
            .unzip();

        Reminder {
            id: Default::default(),
            owner: "owner-1".into(),
            name: "r".into(),
            platform: Platform::Slack,
            webhook_url: "https://hooks.slack.com/services/T/B/X".into(),
            message_content: "hi".into(),
            time_slots,
            days: DaySet::from_codes(&[1]).unwrap(),
            is_active,
            platform_config: PlatformConfig::Slack,
            execution_count: 0,
            last_execution_time: None,
            created_at: 0,
            updated_at: 0,
            next_runs,
        }
    }

    #[test]
    fn it_finds_the_soonest_future_run() {
        let reminders = vec![
            reminder(true, vec![(true, 5_000), (true, 2_000)]),
            reminder(true, vec![(true, 3_000)]),
        ];
        assert_eq!(next_upcoming_run(&reminders, 1_000), Some(2_000));
    }

    #[test]
    fn it_skips_inactive_reminders_and_slots() {
        let reminders = vec![
            reminder(false, vec![(true, 2_000)]),
            reminder(true, vec![(false, 3_000), (true, 4_000)]),
        ];
        assert_eq!(next_upcoming_run(&reminders, 1_000), Some(4_000));
    }

    #[test]
    fn it_skips_sentinels_and_past_runs() {
        let reminders = vec![reminder(true, vec![(true, NEXT_RUN_SENTINEL), (true, 500)])];
        assert_eq!(next_upcoming_run(&reminders, 1_000), None);
    }
}
