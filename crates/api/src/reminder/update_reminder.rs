use super::parse_time_slots;
use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::dtos::TimeSlotInput;
use pingbell_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use pingbell_domain::{
    validate_schedule, DaySet, Platform, PlatformConfig, Reminder, ScheduleConfigError, ID,
};
use pingbell_infra::PingbellContext;
use std::convert::TryFrom;

pub async fn update_reminder_controller(
    ctx: web::Data<PingbellContext>,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let body = body.into_inner();
    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        name: body.name,
        platform: body.platform,
        webhook_url: body.webhook_url,
        message_content: body.message_content,
        platform_config: body.platform_config,
        time_slots: body.time_slots,
        days: body.days,
        is_active: body.is_active,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(PingbellError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub webhook_url: Option<String>,
    pub message_content: Option<String>,
    pub platform_config: Option<PlatformConfig>,
    pub time_slots: Option<Vec<TimeSlotInput>>,
    pub days: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    UnsupportedPlatform(String),
    InvalidWebhookUrl(String),
    InvalidSchedule(String),
    InvalidMessageTemplate(String),
    ConfigPlatformMismatch,
    Storage,
}

impl From<UseCaseError> for PingbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::UnsupportedPlatform(platform) => {
                Self::BadClientData(format!("Platform {} is not supported", platform))
            }
            UseCaseError::InvalidWebhookUrl(url) => Self::BadClientData(format!(
                "The webhook url {} does not match the selected platform",
                url
            )),
            UseCaseError::InvalidSchedule(msg) => Self::BadClientData(msg),
            UseCaseError::InvalidMessageTemplate(msg) => Self::BadClientData(msg),
            UseCaseError::ConfigPlatformMismatch => Self::BadClientData(
                "The platform config does not belong to the selected platform".to_string(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

impl From<ScheduleConfigError> for UseCaseError {
    fn from(e: ScheduleConfigError) -> Self {
        UseCaseError::InvalidSchedule(e.to_string())
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        let platform_switched = match &self.platform {
            Some(platform) => {
                let platform: Platform = platform
                    .parse()
                    .map_err(|_| UseCaseError::UnsupportedPlatform(platform.clone()))?;
                let switched = platform != reminder.platform;
                reminder.platform = platform;
                switched
            }
            None => false,
        };

        // An explicit config must match the (possibly new) platform; a
        // platform switch without one re-seeds the adapter default
        let adapter = ctx.platforms.get(reminder.platform);
        match self.platform_config.take() {
            Some(config) if config.platform() == reminder.platform => {
                reminder.platform_config = config;
            }
            Some(_) => return Err(UseCaseError::ConfigPlatformMismatch),
            None => {
                if platform_switched {
                    reminder.platform_config = adapter.default_config();
                }
            }
        }

        if let Some(name) = self.name.take() {
            reminder.name = name;
        }
        if let Some(webhook_url) = self.webhook_url.take() {
            reminder.webhook_url = webhook_url;
        }
        if let Some(message_content) = self.message_content.take() {
            reminder.message_content = message_content;
        }
        if let Some(is_active) = self.is_active {
            reminder.is_active = is_active;
        }
        if let Some(inputs) = self.time_slots.take() {
            reminder.time_slots = parse_time_slots(&inputs)
                .map_err(|e| UseCaseError::InvalidSchedule(e.to_string()))?;
        }
        if let Some(days) = self.days.take() {
            reminder.days =
                DaySet::try_from(days).map_err(|e| UseCaseError::InvalidSchedule(e.to_string()))?;
        }

        if !adapter.validate_url(&reminder.webhook_url) {
            return Err(UseCaseError::InvalidWebhookUrl(reminder.webhook_url.clone()));
        }
        validate_schedule(&reminder.time_slots, &reminder.days)?;
        adapter
            .format_message(&reminder.message_content, &reminder.platform_config)
            .map_err(|e| UseCaseError::InvalidMessageTemplate(e.to_string()))?;

        reminder.updated_at = ctx.sys.get_timestamp_millis();
        reminder.refresh_next_runs(&ctx.sys.get_datetime());

        match ctx.repos.reminders.save(&reminder).await {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
