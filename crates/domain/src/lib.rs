mod execution_log;
pub mod platform;
mod reminder;
mod schedule;
mod shared;
mod stats;

pub use execution_log::{ExecutionLogEntry, ExecutionStatus};
pub use platform::{
    AdapterError, DingtalkMsgType, FeishuMsgType, Platform, PlatformAdapter, PlatformConfig,
    PlatformRegistry, UnsupportedPlatformError, WechatWorkMsgType, CONTENT_TOKEN,
    MENTION_ALL_MARKER,
};
pub use reminder::{
    validate_schedule, DaySet, InvalidDayCodeError, InvalidTimeError, Reminder,
    ScheduleConfigError, TimeOfDay, TimeSlot, MAX_TIME_SLOTS,
};
pub use schedule::{compute_next_run, compute_next_runs, NEXT_RUN_SENTINEL};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use stats::{next_upcoming_run, ReminderStats};
