use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::toggle_reminder::{APIResponse, PathParams, RequestBody};
use pingbell_domain::{Reminder, ID};
use pingbell_infra::PingbellContext;

pub async fn toggle_reminder_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = ToggleReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        is_active: body.is_active,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(PingbellError::from)
}

/// Activates or deactivates a whole reminder. With no explicit target
/// state the current one is flipped. Either way the next runs are
/// recomputed so the stored schedule never goes stale.
#[derive(Debug)]
pub struct ToggleReminderUseCase {
    pub reminder_id: ID,
    pub is_active: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for PingbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ToggleReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ToggleReminder";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder.is_active = self.is_active.unwrap_or(!reminder.is_active);
        reminder.updated_at = ctx.sys.get_timestamp_millis();
        reminder.refresh_next_runs(&ctx.sys.get_datetime());

        match ctx.repos.reminders.save(&reminder).await {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
