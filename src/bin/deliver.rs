#[path = "../telemetry.rs"]
mod telemetry;

use anyhow::{anyhow, Context};
use pingbell_api::run_manual_execution;
use pingbell_domain::{ExecutionStatus, ID};
use pingbell_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::{info, warn};

/// Manual trigger: delivers one reminder now, outside its schedule.
/// Individual delivery failures are logged, not fatal; the exit code only
/// reflects whether the execution itself could run.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("pingbell-deliver".into(), "info".into());
    init_subscriber(subscriber);

    let mut args = std::env::args().skip(1);
    let reminder_id: ID = args
        .next()
        .ok_or_else(|| anyhow!("Usage: pingbell-deliver <reminder_id> [time_slot_id]"))?
        .parse()
        .context("The given reminder id is malformed")?;
    let time_slot_id = args.next();

    let context = setup_context();
    let executions = run_manual_execution(&context, reminder_id, time_slot_id).await?;

    for entry in &executions {
        match entry.status {
            ExecutionStatus::Success => info!(
                "slot {}: delivered (http status {:?})",
                entry.time_slot_id, entry.response_status
            ),
            ExecutionStatus::Failed => warn!(
                "slot {}: failed ({})",
                entry.time_slot_id,
                entry.error_message.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    Ok(())
}
