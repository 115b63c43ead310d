mod create_reminder;
mod delete_many_reminders;
mod delete_reminder;
mod delivery;
mod execute_due_reminders;
mod execute_reminder;
mod get_execution_history;
mod get_reminder;
mod get_reminder_stats;
mod get_reminders;
mod toggle_reminder;
mod toggle_time_slot;
mod update_reminder;

pub(crate) use execute_due_reminders::ExecuteDueRemindersUseCase;
pub use execute_due_reminders::TickReport;

use crate::shared::usecase::execute;
use actix_web::web;
use anyhow::anyhow;
use create_reminder::create_reminder_controller;
use delete_many_reminders::delete_many_reminders_controller;
use delete_reminder::delete_reminder_controller;
use execute_reminder::{execute_reminder_controller, ExecuteReminderUseCase};
use get_execution_history::get_execution_history_controller;
use get_reminder::get_reminder_controller;
use get_reminder_stats::get_reminder_stats_controller;
use get_reminders::get_reminders_controller;
use pingbell_api_structs::dtos::TimeSlotInput;
use pingbell_domain::{ExecutionLogEntry, InvalidTimeError, TimeSlot, ID};
use pingbell_infra::PingbellContext;
use toggle_reminder::toggle_reminder_controller;
use toggle_time_slot::toggle_time_slot_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminder/batch/delete",
        web::post().to(delete_many_reminders_controller),
    );

    cfg.route(
        "/reminder/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );

    cfg.route(
        "/reminder/{reminder_id}/toggle",
        web::post().to(toggle_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}/timeslot/{slot_id}/toggle",
        web::post().to(toggle_time_slot_controller),
    );

    cfg.route(
        "/reminder/{reminder_id}/execute",
        web::post().to(execute_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}/history",
        web::get().to(get_execution_history_controller),
    );

    cfg.route(
        "/user/{owner}/reminder",
        web::get().to(get_reminders_controller),
    );
    cfg.route(
        "/user/{owner}/reminder/stats",
        web::get().to(get_reminder_stats_controller),
    );
}

/// Turns incoming slot payloads into domain `TimeSlot`s. Ids supplied by
/// the client are kept so log history stays joinable across edits; missing
/// ids are assigned here, before anything is persisted.
pub(crate) fn parse_time_slots(inputs: &[TimeSlotInput]) -> Result<Vec<TimeSlot>, InvalidTimeError> {
    inputs
        .iter()
        .map(|input| {
            Ok(TimeSlot {
                id: input
                    .id
                    .clone()
                    .unwrap_or_else(TimeSlot::assign_id),
                time: input.time.parse()?,
                is_active: input.is_active,
                description: input.description.clone(),
            })
        })
        .collect()
}

/// One-shot dispatcher tick, the entry point the cron-style trigger binary
/// uses. Per-delivery failures are logged, not returned; only store-level
/// failures surface here.
pub async fn run_tick(ctx: &PingbellContext) -> anyhow::Result<TickReport> {
    execute(ExecuteDueRemindersUseCase, ctx)
        .await
        .map_err(|e| anyhow!("Dispatcher tick failed: {:?}", e))
}

/// One-shot manual execution of a single reminder (optionally one slot),
/// for the manual trigger binary
pub async fn run_manual_execution(
    ctx: &PingbellContext,
    reminder_id: ID,
    time_slot_id: Option<String>,
) -> anyhow::Result<Vec<ExecutionLogEntry>> {
    execute(
        ExecuteReminderUseCase {
            reminder_id,
            time_slot_id,
        },
        ctx,
    )
    .await
    .map(|res| res.executions)
    .map_err(|e| anyhow!("Manual execution failed: {:?}", e))
}
