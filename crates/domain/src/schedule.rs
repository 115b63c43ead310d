use crate::reminder::{DaySet, TimeSlot};
use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone};

/// Epoch-zero sentinel stored in `next_runs` for slots that are inactive or
/// whose schedule cannot produce a future run. Never treated as "due" or
/// "upcoming".
pub const NEXT_RUN_SENTINEL: i64 = 0;

/// How many days ahead the calculator scans for the next matching weekday.
/// A weekly schedule always matches within 7 days, so 14 leaves headroom
/// without an unbounded loop.
const SCAN_HORIZON_DAYS: i64 = 14;

/// Computes the next run timestamp (epoch millis) for a single slot.
///
/// Scans forward day by day starting today (inclusive); the first candidate
/// on an active weekday whose wall-clock time is strictly after `now` wins.
pub fn compute_next_run(slot: &TimeSlot, days: &DaySet, now: &DateTime<FixedOffset>) -> i64 {
    if !slot.is_active {
        return NEXT_RUN_SENTINEL;
    }

    for day_offset in 0..SCAN_HORIZON_DAYS {
        let date = now.date_naive() + Duration::days(day_offset);
        if !days.contains(date.weekday().num_days_from_sunday()) {
            continue;
        }
        let candidate = match date.and_hms_opt(slot.time.hours, slot.time.minutes, 0) {
            Some(naive) => match now.timezone().from_local_datetime(&naive).single() {
                Some(candidate) => candidate,
                None => continue,
            },
            None => continue,
        };
        if candidate.timestamp_millis() > now.timestamp_millis() {
            return candidate.timestamp_millis();
        }
    }

    NEXT_RUN_SENTINEL
}

/// Computes one next-run timestamp per slot, index-aligned with the input.
///
/// Always a full recomputation: a single day or time edit can change which
/// slot is soonest, so callers must never patch `next_runs` incrementally.
pub fn compute_next_runs(slots: &[TimeSlot], days: &DaySet, now: &DateTime<FixedOffset>) -> Vec<i64> {
    slots
        .iter()
        .map(|slot| compute_next_run(slot, days, now))
        .collect()
}
