use crate::{
    platform::{Platform, PlatformConfig},
    schedule::compute_next_runs,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, FixedOffset};
use pingbell_utils::create_random_secret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on the number of daily trigger times a single `Reminder` can hold
pub const MAX_TIME_SLOTS: usize = 3;

const SLOT_ID_SECRET_LEN: usize = 10;

/// A wall-clock time of day without a date or zone, in 24h form.
///
/// This is the unit the dispatcher matches on: a `TimeSlot` fires only in
/// the minute whose local wall-clock time equals its `TimeOfDay` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self { hours, minutes })
        } else {
            None
        }
    }
}

impl std::cmp::PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.hours.cmp(&other.hours) {
            std::cmp::Ordering::Less => return Some(std::cmp::Ordering::Less),
            std::cmp::Ordering::Greater => return Some(std::cmp::Ordering::Greater),
            _ => (),
        };

        Some(self.minutes.cmp(&other.minutes))
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Time: {0} is malformed, expected HH:MM in 24h form")]
pub struct InvalidTimeError(pub String);

impl FromStr for TimeOfDay {
    type Err = InvalidTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ':');
        let hours = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minutes = parts.next().and_then(|p| p.parse::<u32>().ok());
        match (hours, minutes) {
            (Some(hours), Some(minutes)) => {
                TimeOfDay::new(hours, minutes).ok_or_else(|| InvalidTimeError(s.to_string()))
            }
            _ => Err(InvalidTimeError(s.to_string())),
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = InvalidTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// The set of weekdays a `Reminder` is active on, as weekday codes
/// `0..=6` where `0` is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DaySet(BTreeSet<u32>);

#[derive(Error, Debug, PartialEq)]
#[error("Weekday code: {0} is malformed, expected \"0\"..\"6\"")]
pub struct InvalidDayCodeError(pub String);

impl DaySet {
    pub fn from_codes(codes: &[u32]) -> Result<Self, InvalidDayCodeError> {
        let mut days = BTreeSet::new();
        for code in codes {
            if *code > 6 {
                return Err(InvalidDayCodeError(code.to_string()));
            }
            days.insert(*code);
        }
        Ok(Self(days))
    }

    pub fn contains(&self, code: u32) -> bool {
        self.0.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Vec<String>> for DaySet {
    type Error = InvalidDayCodeError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let mut days = BTreeSet::new();
        for code in value {
            let parsed = code
                .parse::<u32>()
                .map_err(|_| InvalidDayCodeError(code.clone()))?;
            if parsed > 6 {
                return Err(InvalidDayCodeError(code));
            }
            days.insert(parsed);
        }
        Ok(Self(days))
    }
}

impl From<DaySet> for Vec<String> {
    fn from(days: DaySet) -> Self {
        days.0.iter().map(|code| code.to_string()).collect()
    }
}

/// One independently toggleable daily trigger time within a `Reminder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub time: TimeOfDay,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimeSlot {
    /// Slot ids are assigned here, before the reminder is persisted,
    /// never by the store
    pub fn assign_id() -> String {
        format!("slot_{}", create_random_secret(SLOT_ID_SECRET_LEN))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleConfigError {
    #[error("A reminder must have at least one time slot")]
    NoTimeSlots,
    #[error("A reminder can have at most {max} time slots, got {got}")]
    TooManyTimeSlots { max: usize, got: usize },
    #[error("A reminder must have at least one active time slot")]
    NoActiveTimeSlots,
    #[error("A reminder must be active on at least one weekday")]
    EmptyDays,
}

/// Validates the schedule shape of a reminder before it is persisted.
/// Toggle operations deliberately skip this so a user can switch off the
/// last active slot; the next-run sentinel covers that degraded state.
pub fn validate_schedule(time_slots: &[TimeSlot], days: &DaySet) -> Result<(), ScheduleConfigError> {
    if time_slots.is_empty() {
        return Err(ScheduleConfigError::NoTimeSlots);
    }
    if time_slots.len() > MAX_TIME_SLOTS {
        return Err(ScheduleConfigError::TooManyTimeSlots {
            max: MAX_TIME_SLOTS,
            got: time_slots.len(),
        });
    }
    if !time_slots.iter().any(|slot| slot.is_active) {
        return Err(ScheduleConfigError::NoActiveTimeSlots);
    }
    if days.is_empty() {
        return Err(ScheduleConfigError::EmptyDays);
    }
    Ok(())
}

/// A `Reminder` is a named recurring notification job: up to three daily
/// trigger times crossed with an active-weekday set, delivered to a chat
/// platform webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ID,
    /// Opaque identifier of the owning user, supplied by the UI collaborator
    pub owner: String,
    pub name: String,
    pub platform: Platform,
    pub webhook_url: String,
    pub message_content: String,
    pub time_slots: Vec<TimeSlot>,
    pub days: DaySet,
    pub is_active: bool,
    pub platform_config: PlatformConfig,
    pub execution_count: i64,
    pub last_execution_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    /// One entry per `TimeSlot`, index-aligned. An inactive slot's entry is
    /// the epoch-zero sentinel. Recomputed in full on every schedule edit.
    pub next_runs: Vec<i64>,
}

impl Reminder {
    pub fn refresh_next_runs(&mut self, now: &DateTime<FixedOffset>) {
        self.next_runs = compute_next_runs(&self.time_slots, &self.days, now);
    }

    pub fn time_slot(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.id == slot_id)
    }

    /// The slots that are due at the given wall-clock minute. Exact match
    /// only: a tick cadence coarser than one minute skips slots.
    pub fn due_slots(&self, at: TimeOfDay) -> Vec<&TimeSlot> {
        self.time_slots
            .iter()
            .filter(|slot| slot.is_active && slot.time == at)
            .collect()
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
