use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::get_execution_history::{APIResponse, PathParams, QueryParams};
use pingbell_domain::{ExecutionLogEntry, ID};
use pingbell_infra::PingbellContext;

pub async fn get_execution_history_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = GetExecutionHistoryUseCase {
        reminder_id: path_params.reminder_id.clone(),
        limit: query_params.limit,
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(PingbellError::from)
}

#[derive(Debug)]
pub struct GetExecutionHistoryUseCase {
    pub reminder_id: ID,
    pub limit: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PingbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetExecutionHistoryUseCase {
    type Response = Vec<ExecutionLogEntry>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetExecutionHistory";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.reminders.find(&self.reminder_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.reminder_id.clone()));
        }

        let cap = ctx.config.execution_history_limit;
        let limit = self.limit.unwrap_or(cap).min(cap);

        Ok(ctx
            .repos
            .execution_logs
            .find_by_reminder(&self.reminder_id, limit)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use pingbell_domain::{DaySet, Platform, PlatformConfig, Reminder, TimeSlot};
    use std::sync::Arc;

    #[actix_web::test]
    async fn it_returns_recent_entries_first_within_the_cap() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));
        let reminder = Reminder {
            id: Default::default(),
            owner: "alice".into(),
            name: "Standup".into(),
            platform: Platform::Slack,
            webhook_url: "https://hooks.slack.com/services/T/B/X".into(),
            message_content: "Standup".into(),
            time_slots: vec![TimeSlot {
                id: "slot_a".into(),
                time: "09:00".parse().unwrap(),
                is_active: true,
                description: None,
            }],
            days: DaySet::from_codes(&[1]).unwrap(),
            is_active: true,
            platform_config: PlatformConfig::Slack,
            execution_count: 0,
            last_execution_time: None,
            created_at: 0,
            updated_at: 0,
            next_runs: vec![0],
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        for ts in &[100, 300, 200] {
            ctx.repos
                .execution_logs
                .insert(&ExecutionLogEntry::success(
                    reminder.id.clone(),
                    "slot_a".into(),
                    *ts,
                    Some(200),
                ))
                .await
                .unwrap();
        }

        let usecase = GetExecutionHistoryUseCase {
            reminder_id: reminder.id.clone(),
            limit: Some(2),
        };
        let history = execute(usecase, &ctx).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].executed_at, 300);
        assert_eq!(history[1].executed_at, 200);
    }

    #[actix_web::test]
    async fn it_fails_for_unknown_reminders() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));
        let unknown = ID::default();

        let usecase = GetExecutionHistoryUseCase {
            reminder_id: unknown.clone(),
            limit: None,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(unknown)
        );
    }
}
