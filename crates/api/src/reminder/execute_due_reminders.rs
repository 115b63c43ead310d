use super::delivery::deliver_to_slot;
use crate::shared::usecase::UseCase;
use chrono::{Datelike, Timelike};
use futures::future::join_all;
use pingbell_domain::{ExecutionStatus, Reminder, TimeOfDay, TimeSlot};
use pingbell_infra::PingbellContext;

/// One dispatcher tick: find the (reminder, slot) pairs due at the current
/// local minute and deliver each as an independent unit of work.
///
/// The tick is a pure "run once" contract. It holds no timer of its own,
/// so it can be driven by the in-process minutely job, a cron entry or a
/// serverless trigger interchangeably.
#[derive(Debug)]
pub struct ExecuteDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    /// The store could not be queried; there is no partial reminder set to
    /// evaluate, so the whole tick fails.
    StoreUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    pub reminders_matched: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExecuteDueRemindersUseCase {
    type Response = TickReport;

    type Error = UseCaseError;

    const NAME: &'static str = "ExecuteDueReminders";

    async fn execute(&mut self, ctx: &PingbellContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_datetime();
        let current_time = TimeOfDay {
            hours: now.hour(),
            minutes: now.minute(),
        };
        let current_day = now.weekday().num_days_from_sunday();

        let reminders = ctx
            .repos
            .reminders
            .find_active_by_day(current_day)
            .await
            .map_err(|e| UseCaseError::StoreUnavailable(e.to_string()))?;

        let mut due: Vec<(Reminder, TimeSlot)> = Vec::new();
        for reminder in &reminders {
            for slot in reminder.due_slots(current_time) {
                due.push((reminder.clone(), slot.clone()));
            }
        }

        let reminders_matched = due.len();
        let deliveries = join_all(
            due.iter()
                .map(|(reminder, slot)| deliver_to_slot(ctx, reminder, slot)),
        )
        .await;

        let delivered = deliveries
            .iter()
            .filter(|entry| entry.status == ExecutionStatus::Success)
            .count();

        Ok(TickReport {
            reminders_matched,
            delivered,
            failed: reminders_matched - delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use crate::shared::usecase::execute;
    use chrono::{FixedOffset, TimeZone};
    use pingbell_domain::{
        DaySet, Platform, PlatformConfig, Reminder, TimeSlot, MENTION_ALL_MARKER,
    };
    use pingbell_infra::DeliveryReport;
    use std::sync::Arc;

    fn standup_reminder(url: &str, slot_time: &str, slot_active: bool) -> Reminder {
        let slot = TimeSlot {
            id: TimeSlot::assign_id(),
            time: slot_time.parse().unwrap(),
            is_active: slot_active,
            description: None,
        };
        Reminder {
            id: Default::default(),
            owner: "alice".into(),
            name: "Standup".into(),
            platform: Platform::WechatWork,
            webhook_url: url.into(),
            message_content: "Standup".into(),
            time_slots: vec![slot],
            days: DaySet::from_codes(&[1, 2, 3, 4, 5]).unwrap(),
            is_active: true,
            platform_config: PlatformConfig::WechatWork {
                msg_type: pingbell_domain::WechatWorkMsgType::Text,
                mention_all: true,
            },
            execution_count: 0,
            last_execution_time: None,
            created_at: 0,
            updated_at: 0,
            next_runs: vec![0],
        }
    }

    #[actix_web::test]
    async fn it_delivers_a_due_reminder_and_records_success() {
        let notifier = Arc::new(StubNotifier::ok());
        let ctx = setup_test_context(monday_at_nine(), notifier.clone());

        let reminder = standup_reminder(
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc",
            "09:00",
            true,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let report = execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(
            report,
            TickReport {
                reminders_matched: 1,
                delivered: 1,
                failed: 0
            }
        );

        // Counter went from 0 to 1 and the success entry is in the log
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.execution_count, 1);
        assert_eq!(
            stored.last_execution_time,
            Some(monday_at_nine().timestamp_millis())
        );

        let history = ctx.repos.execution_logs.find_by_reminder(&reminder.id, 10).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, ExecutionStatus::Success);
        assert_eq!(history[0].response_status, Some(200));

        // The formatted payload leads with the all-mention marker
        let deliveries = notifier.deliveries.lock().unwrap();
        let content = deliveries[0].payload["text"]["content"].as_str().unwrap();
        assert!(content.starts_with(MENTION_ALL_MARKER));
        assert!(content.contains("Standup"));
    }

    #[actix_web::test]
    async fn it_only_matches_the_exact_minute() {
        let notifier = Arc::new(StubNotifier::ok());

        for (minute, expected_matches) in &[(59u32, 0usize), (0, 1), (1, 0)] {
            let now = FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2021, 2, 22, if *minute == 59 { 8 } else { 9 }, *minute, 0)
                .unwrap();
            let ctx = setup_test_context(now, notifier.clone());

            let reminder = standup_reminder(
                "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc",
                "09:00",
                true,
            );
            ctx.repos.reminders.insert(&reminder).await.unwrap();

            let report = execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();
            assert_eq!(
                report.reminders_matched, *expected_matches,
                "minute {}",
                minute
            );
        }
    }

    #[actix_web::test]
    async fn it_skips_days_outside_the_day_set() {
        let notifier = Arc::new(StubNotifier::ok());
        // Saturday 2021-02-20 09:00, reminder runs Mon-Fri
        let saturday = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2021, 2, 20, 9, 0, 0)
            .unwrap();
        let ctx = setup_test_context(saturday, notifier.clone());

        let reminder = standup_reminder(
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc",
            "09:00",
            true,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let report = execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.reminders_matched, 0);
        assert_eq!(notifier.delivery_count(), 0);
    }

    #[actix_web::test]
    async fn it_produces_nothing_for_inactive_slots() {
        let notifier = Arc::new(StubNotifier::ok());
        let ctx = setup_test_context(monday_at_nine(), notifier.clone());

        let reminder = standup_reminder(
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc",
            "09:00",
            false,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let report = execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.reminders_matched, 0);
        assert_eq!(notifier.delivery_count(), 0);
        assert!(ctx
            .repos
            .execution_logs
            .find_by_reminder(&reminder.id, 10)
            .await
            .is_empty());
    }

    #[actix_web::test]
    async fn a_failing_delivery_does_not_abort_its_siblings() {
        let failing_url = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=bad";
        let notifier = Arc::new(StubNotifier::ok().respond(
            failing_url,
            DeliveryReport::failed(Some(500), "Webhook responded with status 500".into()),
        ));
        let ctx = setup_test_context(monday_at_nine(), notifier.clone());

        let failing = standup_reminder(failing_url, "09:00", true);
        let healthy = standup_reminder(
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=good",
            "09:00",
            true,
        );
        ctx.repos.reminders.insert(&failing).await.unwrap();
        ctx.repos.reminders.insert(&healthy).await.unwrap();

        let report = execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);

        // One failed entry with the captured status, no counter bump
        let failing_history = ctx.repos.execution_logs.find_by_reminder(&failing.id, 10).await;
        assert_eq!(failing_history.len(), 1);
        assert_eq!(failing_history[0].status, ExecutionStatus::Failed);
        assert_eq!(failing_history[0].response_status, Some(500));
        assert_eq!(
            ctx.repos.reminders.find(&failing.id).await.unwrap().execution_count,
            0
        );

        // The healthy sibling delivered and counted
        let healthy_history = ctx.repos.execution_logs.find_by_reminder(&healthy.id, 10).await;
        assert_eq!(healthy_history.len(), 1);
        assert_eq!(healthy_history[0].status, ExecutionStatus::Success);
        assert_eq!(
            ctx.repos.reminders.find(&healthy.id).await.unwrap().execution_count,
            1
        );
    }

    #[actix_web::test]
    async fn it_prefixes_the_slot_description_on_its_own_line() {
        let notifier = Arc::new(StubNotifier::ok());
        let ctx = setup_test_context(monday_at_nine(), notifier.clone());

        let mut reminder = standup_reminder(
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc",
            "09:00",
            true,
        );
        reminder.time_slots[0].description = Some("Morning round".into());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        execute(ExecuteDueRemindersUseCase, &ctx).await.unwrap();

        let deliveries = notifier.deliveries.lock().unwrap();
        let content = deliveries[0].payload["text"]["content"].as_str().unwrap();
        assert!(content.contains("Morning round\nStandup"));
    }
}
