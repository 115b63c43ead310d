use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::DateTime;
use pingbell_api_structs::get_reminder_stats::{APIResponse, PathParams};
use pingbell_domain::{next_upcoming_run, ExecutionStatus, ReminderStats, ID};
use pingbell_infra::PingbellContext;

pub async fn get_reminder_stats_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = GetReminderStatsUseCase {
        owner: path_params.owner.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|stats| HttpResponse::Ok().json(APIResponse::new(stats)))
        .map_err(PingbellError::from)
}

/// Dashboard numbers for one owner. Derived read-only from the reminder
/// set and the log; a stale-by-one-tick read is fine.
#[derive(Debug)]
pub struct GetReminderStatsUseCase {
    pub owner: String,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for PingbellError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderStatsUseCase {
    type Response = ReminderStats;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderStats";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.find_by_owner(&self.owner).await;
        let active = reminders.iter().filter(|r| r.is_active).count();

        let reminder_ids: Vec<ID> = reminders.iter().map(|r| r.id.clone()).collect();
        let entries = ctx
            .repos
            .execution_logs
            .find_by_reminders(&reminder_ids)
            .await;

        let now = ctx.sys.get_datetime();
        let today = now.date_naive();
        let today_executions = entries
            .iter()
            .filter(|entry| entry.status == ExecutionStatus::Success)
            .filter(|entry| {
                DateTime::from_timestamp_millis(entry.executed_at)
                    .map(|dt| dt.with_timezone(&now.timezone()).date_naive() == today)
                    .unwrap_or(false)
            })
            .count();

        Ok(ReminderStats {
            total: reminders.len(),
            active,
            inactive: reminders.len() - active,
            total_executions: reminders.iter().map(|r| r.execution_count).sum(),
            today_executions,
            next_execution: next_upcoming_run(&reminders, ctx.sys.get_timestamp_millis()),
        })
    }
}
