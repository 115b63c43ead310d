use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::get_reminders::{APIResponse, PathParams};
use pingbell_domain::Reminder;
use pingbell_infra::PingbellContext;

pub async fn get_reminders_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
) -> Result<HttpResponse, PingbellError> {
    let usecase = GetRemindersUseCase {
        owner: path_params.owner.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(PingbellError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
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
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminders.find_by_owner(&self.owner).await)
    }
}
