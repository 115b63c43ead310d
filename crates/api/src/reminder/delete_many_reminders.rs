use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::delete_many_reminders::{APIResponse, RequestBody};
use pingbell_domain::ID;
use pingbell_infra::PingbellContext;
use tracing::error;

pub async fn delete_many_reminders_controller(
    ctx: web::Data<PingbellContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = DeleteManyRemindersUseCase {
        reminder_ids: body.reminder_ids.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(PingbellError::from)
}

/// Batch delete. Ids that do not exist are skipped rather than failing the
/// whole batch; the response carries the number actually removed.
#[derive(Debug)]
pub struct DeleteManyRemindersUseCase {
    pub reminder_ids: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for PingbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteManyRemindersUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteManyReminders";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let res = ctx
            .repos
            .reminders
            .delete_many(&self.reminder_ids)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        if let Err(e) = ctx
            .repos
            .execution_logs
            .delete_by_reminders(&self.reminder_ids)
            .await
        {
            error!("Could not purge execution logs for batch delete: {:?}", e);
        }

        Ok(res.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use pingbell_domain::{DaySet, Platform, PlatformConfig, Reminder, TimeSlot};
    use std::sync::Arc;

    fn reminder() -> Reminder {
        Reminder {
            id: Default::default(),
            owner: "alice".into(),
            name: "Standup".into(),
            platform: Platform::Slack,
            webhook_url: "https://hooks.slack.com/services/T/B/X".into(),
            message_content: "Standup".into(),
            time_slots: vec![TimeSlot {
                id: TimeSlot::assign_id(),
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
        }
    }

    #[actix_web::test]
    async fn it_deletes_a_batch_and_skips_unknown_ids() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));
        let keep = reminder();
        let first = reminder();
        let second = reminder();
        for r in &[&keep, &first, &second] {
            ctx.repos.reminders.insert(r).await.unwrap();
        }

        let usecase = DeleteManyRemindersUseCase {
            reminder_ids: vec![first.id.clone(), second.id.clone(), ID::default()],
        };
        let deleted_count = execute(usecase, &ctx).await.unwrap();

        assert_eq!(deleted_count, 2);
        assert!(ctx.repos.reminders.find(&keep.id).await.is_some());
        assert!(ctx.repos.reminders.find(&first.id).await.is_none());
        assert!(ctx.repos.reminders.find(&second.id).await.is_none());
    }
}
