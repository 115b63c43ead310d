use pingbell_domain::{ExecutionLogEntry, ExecutionStatus, Reminder, TimeSlot};
use pingbell_infra::PingbellContext;
use tracing::error;

/// Delivers one (reminder, slot) unit of work: format, POST, write the
/// audit entry, bump counters on success.
///
/// Scheduled ticks and manual execution both run through here, so the two
/// are indistinguishable in the audit trail. Failures are folded into the
/// returned entry; nothing escapes to abort sibling deliveries.
pub(crate) async fn deliver_to_slot(
    ctx: &PingbellContext,
    reminder: &Reminder,
    slot: &TimeSlot,
) -> ExecutionLogEntry {
    let executed_at = ctx.sys.get_timestamp_millis();
    let adapter = ctx.platforms.get(reminder.platform);

    // The slot description, when present, leads on its own line
    let content = match &slot.description {
        Some(description) if !description.is_empty() => {
            format!("{}\n{}", description, reminder.message_content)
        }
        _ => reminder.message_content.clone(),
    };

    let entry = match adapter.format_message(&content, &reminder.platform_config) {
        Ok(payload) => {
            let report = ctx
                .notifier
                .deliver(
                    &reminder.webhook_url,
                    &reminder.platform_config.extra_headers(),
                    &payload,
                )
                .await;
            if report.success {
                ExecutionLogEntry::success(
                    reminder.id.clone(),
                    slot.id.clone(),
                    executed_at,
                    report.http_status,
                )
            } else {
                ExecutionLogEntry::failed(
                    reminder.id.clone(),
                    slot.id.clone(),
                    executed_at,
                    report.error_message,
                    report.http_status,
                )
            }
        }
        Err(e) => ExecutionLogEntry::failed(
            reminder.id.clone(),
            slot.id.clone(),
            executed_at,
            Some(e.to_string()),
            None,
        ),
    };

    if let Err(e) = ctx.repos.execution_logs.insert(&entry).await {
        error!(
            "Could not write execution log entry for reminder {}: {:?}",
            reminder.id, e
        );
    }

    if entry.status == ExecutionStatus::Success {
        if let Err(e) = ctx
            .repos
            .reminders
            .increment_execution(&reminder.id, executed_at)
            .await
        {
            error!(
                "Could not bump execution counter for reminder {}: {:?}",
                reminder.id, e
            );
        }
    }

    entry
}
