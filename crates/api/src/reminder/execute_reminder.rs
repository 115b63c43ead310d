use super::delivery::deliver_to_slot;
use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use futures::future::join_all;
use pingbell_api_structs::execute_reminder::{APIResponse, PathParams, RequestBody};
use pingbell_domain::{ExecutionLogEntry, TimeSlot, ID};
use pingbell_infra::PingbellContext;

pub async fn execute_reminder_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = ExecuteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        time_slot_id: body.time_slot_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.executions)))
        .map_err(PingbellError::from)
}

/// "Execute now": bypasses the time and day filtering for one reminder and
/// runs the normal delivery path, so the audit trail cannot tell a manual
/// run from a scheduled one.
///
/// With a slot id the named slot is delivered even if currently switched
/// off (the user asked for it explicitly); without one every active slot
/// is delivered.
#[derive(Debug)]
pub struct ExecuteReminderUseCase {
    pub reminder_id: ID,
    pub time_slot_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    ReminderNotFound(ID),
    TimeSlotNotFound(String),
}

impl From<UseCaseError> for PingbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ReminderNotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::TimeSlotNotFound(slot_id) => Self::NotFound(format!(
                "The time slot with id: {}, was not found.",
                slot_id
            )),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub executions: Vec<ExecutionLogEntry>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExecuteReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ExecuteReminder";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::ReminderNotFound(self.reminder_id.clone()))?;

        let slots: Vec<TimeSlot> = match &self.time_slot_id {
            Some(slot_id) => vec![reminder
                .time_slot(slot_id)
                .ok_or_else(|| UseCaseError::TimeSlotNotFound(slot_id.clone()))?
                .clone()],
            None => reminder
                .time_slots
                .iter()
                .filter(|slot| slot.is_active)
                .cloned()
                .collect(),
        };

        let executions = join_all(
            slots
                .iter()
                .map(|slot| deliver_to_slot(ctx, &reminder, slot)),
        )
        .await;

        Ok(UseCaseRes { executions })
    }
}
