use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::toggle_time_slot::{APIResponse, PathParams};
use pingbell_domain::{Reminder, ID};
use pingbell_infra::PingbellContext;

pub async fn toggle_time_slot_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = ToggleTimeSlotUseCase {
        reminder_id: path_params.reminder_id.clone(),
        slot_id: path_params.slot_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(PingbellError::from)
}

/// Flips a single slot on or off and recomputes the whole next-run array.
/// Switching off the last active slot is allowed here; the sentinel marks
/// the degraded schedule until the user re-enables something.
#[derive(Debug)]
pub struct ToggleTimeSlotUseCase {
    pub reminder_id: ID,
    pub slot_id: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    ReminderNotFound(ID),
    TimeSlotNotFound(String),
    Storage,
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
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ToggleTimeSlotUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ToggleTimeSlot";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::ReminderNotFound(self.reminder_id.clone()))?;

        let slot = reminder
            .time_slots
            .iter_mut()
            .find(|slot| slot.id == self.slot_id)
            .ok_or_else(|| UseCaseError::TimeSlotNotFound(self.slot_id.clone()))?;
        slot.is_active = !slot.is_active;

        reminder.updated_at = ctx.sys.get_timestamp_millis();
        reminder.refresh_next_runs(&ctx.sys.get_datetime());

        match ctx.repos.reminders.save(&reminder).await {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
