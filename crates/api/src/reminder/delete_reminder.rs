use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::delete_reminder::{APIResponse, PathParams};
use pingbell_domain::{Reminder, ID};
use pingbell_infra::PingbellContext;
use tracing::error;

pub async fn delete_reminder_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(PingbellError::from)
}

/// Deletes one reminder and purges its execution history alongside it,
/// the one sanctioned deletion path for log entries.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
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

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        if let Err(e) = ctx
            .repos
            .execution_logs
            .delete_by_reminders(std::slice::from_ref(&self.reminder_id))
            .await
        {
            error!(
                "Could not purge execution log for deleted reminder {}: {:?}",
                self.reminder_id, e
            );
        }

        Ok(UseCaseRes { reminder })
    }
}
