use super::parse_time_slots;
use crate::error::PingbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pingbell_api_structs::create_reminder::{APIResponse, RequestBody};
use pingbell_api_structs::dtos::TimeSlotInput;
use pingbell_domain::{
    validate_schedule, DaySet, Platform, PlatformConfig, Reminder, ScheduleConfigError,
};
use pingbell_infra::PingbellContext;
use std::convert::TryFrom;

pub async fn create_reminder_controller(
    ctx: web::Data<PingbellContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let body = body.into_inner();
    let usecase = CreateReminderUseCase {
        owner: body.owner,
        name: body.name,
        platform: body.platform,
        webhook_url: body.webhook_url,
        message_content: body.message_content,
        time_slots: body.time_slots,
        days: body.days,
        platform_config: body.platform_config,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.reminder)))
        .map_err(PingbellError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner: String,
    pub name: String,
    pub platform: String,
    pub webhook_url: String,
    pub message_content: String,
    pub time_slots: Vec<TimeSlotInput>,
    pub days: Vec<String>,
    pub platform_config: Option<PlatformConfig>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
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
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let platform: Platform = self
            .platform
            .parse()
            .map_err(|_| UseCaseError::UnsupportedPlatform(self.platform.clone()))?;
        let adapter = ctx.platforms.get(platform);

        if !adapter.validate_url(&self.webhook_url) {
            return Err(UseCaseError::InvalidWebhookUrl(self.webhook_url.clone()));
        }

        let time_slots = parse_time_slots(&self.time_slots)
            .map_err(|e| UseCaseError::InvalidSchedule(e.to_string()))?;
        let days = DaySet::try_from(self.days.clone())
            .map_err(|e| UseCaseError::InvalidSchedule(e.to_string()))?;
        validate_schedule(&time_slots, &days)?;

        let platform_config = match self.platform_config.take() {
            Some(config) if config.platform() == platform => config,
            Some(_) => return Err(UseCaseError::ConfigPlatformMismatch),
            None => adapter.default_config(),
        };

        // Surfaces a malformed custom body template before anything is stored
        adapter
            .format_message(&self.message_content, &platform_config)
            .map_err(|e| UseCaseError::InvalidMessageTemplate(e.to_string()))?;

        let now = ctx.sys.get_timestamp_millis();
        let mut reminder = Reminder {
            id: Default::default(),
            owner: self.owner.clone(),
            name: self.name.clone(),
            platform,
            webhook_url: self.webhook_url.clone(),
            message_content: self.message_content.clone(),
            time_slots,
            days,
            is_active: true,
            platform_config,
            execution_count: 0,
            last_execution_time: None,
            created_at: now,
            updated_at: now,
            next_runs: Vec::new(),
        };
        reminder.refresh_next_runs(&ctx.sys.get_datetime());

        match ctx.repos.reminders.insert(&reminder).await {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use pingbell_domain::NEXT_RUN_SENTINEL;
    use std::sync::Arc;

    fn slot_input(time: &str, is_active: bool) -> TimeSlotInput {
        TimeSlotInput {
            id: None,
            time: time.into(),
            is_active,
            description: None,
        }
    }

    fn usecase() -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner: "alice".into(),
            name: "Standup".into(),
            platform: "wechat_work".into(),
            webhook_url: "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc".into(),
            message_content: "Standup".into(),
            time_slots: vec![slot_input("09:00", true)],
            days: vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
            platform_config: None,
        }
    }

    #[actix_web::test]
    async fn it_creates_a_reminder_with_seeded_config_and_next_runs() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let res = execute(usecase(), &ctx).await.unwrap();
        let reminder = res.reminder;

        assert_eq!(reminder.platform, Platform::WechatWork);
        assert_eq!(
            reminder.platform_config,
            PlatformConfig::WechatWork {
                msg_type: pingbell_domain::WechatWorkMsgType::Text,
                mention_all: true,
            }
        );
        assert_eq!(reminder.time_slots.len(), reminder.next_runs.len());
        assert!(reminder.time_slots[0].id.starts_with("slot_"));
        assert!(reminder.next_runs[0] > monday_at_nine().timestamp_millis());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }

    #[actix_web::test]
    async fn inactive_slots_get_the_sentinel_next_run() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut usecase = usecase();
        usecase.time_slots = vec![slot_input("10:00", true), slot_input("11:00", false)];

        let res = execute(usecase, &ctx).await.unwrap();
        assert!(res.reminder.next_runs[0] > 0);
        assert_eq!(res.reminder.next_runs[1], NEXT_RUN_SENTINEL);
    }

    #[actix_web::test]
    async fn it_rejects_unknown_platforms_instead_of_defaulting() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut usecase = usecase();
        usecase.platform = "telegram".into();

        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::UnsupportedPlatform("telegram".into())
        );
    }

    #[actix_web::test]
    async fn it_rejects_urls_that_do_not_match_the_platform() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut usecase = usecase();
        usecase.webhook_url = "https://hooks.slack.com/services/T/B/X".into();

        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidWebhookUrl(_))
        ));
    }

    #[actix_web::test]
    async fn it_rejects_invalid_schedules() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut too_many = usecase();
        too_many.time_slots = vec![
            slot_input("09:00", true),
            slot_input("10:00", true),
            slot_input("11:00", true),
            slot_input("12:00", true),
        ];
        assert!(matches!(
            execute(too_many, &ctx).await,
            Err(UseCaseError::InvalidSchedule(_))
        ));

        let mut no_days = usecase();
        no_days.days = Vec::new();
        assert!(matches!(
            execute(no_days, &ctx).await,
            Err(UseCaseError::InvalidSchedule(_))
        ));

        let mut bad_time = usecase();
        bad_time.time_slots = vec![slot_input("25:00", true)];
        assert!(matches!(
            execute(bad_time, &ctx).await,
            Err(UseCaseError::InvalidSchedule(_))
        ));
    }

    #[actix_web::test]
    async fn it_rejects_malformed_custom_templates() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut usecase = usecase();
        usecase.platform = "custom".into();
        usecase.webhook_url = "https://example.com/hook".into();
        usecase.platform_config = Some(PlatformConfig::Custom {
            body_template: "{\"text\": \"no token here\"}".into(),
            headers: Default::default(),
        });

        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidMessageTemplate(_))
        ));
    }

    #[actix_web::test]
    async fn it_rejects_config_for_a_different_platform() {
        let ctx = setup_test_context(monday_at_nine(), Arc::new(StubNotifier::ok()));

        let mut usecase = usecase();
        usecase.platform_config = Some(PlatformConfig::Slack);

        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::ConfigPlatformMismatch
        );
    }
}
