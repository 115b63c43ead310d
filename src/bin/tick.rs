#[path = "../telemetry.rs"]
mod telemetry;

use pingbell_api::run_tick;
use pingbell_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

/// Cron-style trigger: runs exactly one dispatcher tick and exits.
/// Per-delivery failures are recorded in the execution log and do not
/// affect the exit code; only a store-level failure exits non-zero.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("pingbell-tick".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    let report = run_tick(&context).await?;

    info!(
        "Tick done: {} due, {} delivered, {} failed",
        report.reminders_matched, report.delivered, report.failed
    );
    Ok(())
}
