use crate::reminder::ExecuteDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use pingbell_infra::PingbellContext;
use std::time::Duration;
use tracing::{error, info};

/// Millis to wait so the first tick lands on a minute boundary. The
/// dispatcher matches slots by exact HH:MM, so ticks must be aligned with
/// wall-clock minutes or whole days of slots get skipped.
pub fn millis_until_next_minute(now_millis: i64) -> u64 {
    const MINUTE: i64 = 60 * 1000;
    let into_minute = now_millis.rem_euclid(MINUTE);
    (MINUTE - into_minute) as u64
}

/// In-process minutely dispatcher for deployments that are not driven by
/// an external cron. Each tick runs detached so a slow batch of webhooks
/// cannot delay the next minute.
pub fn start_dispatcher_job(ctx: PingbellContext) {
    actix_web::rt::spawn(async move {
        let start_delay = millis_until_next_minute(ctx.sys.get_timestamp_millis());
        sleep(Duration::from_millis(start_delay)).await;

        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                match execute(ExecuteDueRemindersUseCase, &context).await {
                    Ok(report) => {
                        if report.reminders_matched > 0 {
                            info!(
                                "Dispatcher tick: {} due, {} delivered, {} failed",
                                report.reminders_matched, report.delivered, report.failed
                            );
                        }
                    }
                    Err(e) => error!("Dispatcher tick failed: {:?}", e),
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_alignment_works() {
        assert_eq!(millis_until_next_minute(0), 60_000);
        assert_eq!(millis_until_next_minute(59_000), 1_000);
        assert_eq!(millis_until_next_minute(60_000), 60_000);
        assert_eq!(millis_until_next_minute(61_500), 58_500);
        assert_eq!(millis_until_next_minute(1_613_984_400_123), 59_877);
    }
}
