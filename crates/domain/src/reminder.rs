use crate::interval::OutageInterval;
use crate::queue::Queue;
use crate::shared::entity::ID;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Reminders are never scheduled with less lead time than this
pub const MIN_MINUTES_BEFORE: u32 = 5;

const REMINDER_KEY_PREFIX: &str = "shutdown_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertContent {
    pub title: String,
    pub body: String,
}

/// A `ReminderJob` is a local alert fired some minutes before an outage
/// of a `Queue` starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderJob {
    /// Deterministic from queue name and outage start, so that deriving the
    /// same outage twice replaces the earlier job instead of duplicating it.
    pub key: String,
    pub fire_at: NaiveDateTime,
    pub queue_id: ID,
    pub interval_label: String,
    pub content: AlertContent,
}

impl ReminderJob {
    pub fn key_for(queue_name: &str, interval: &OutageInterval) -> String {
        format!("{}{}_{}", REMINDER_KEY_PREFIX, interval.from, queue_name)
    }

    /// Whether `key` is a reminder of the queue named `queue_name`
    pub fn in_namespace(key: &str, queue_name: &str) -> bool {
        key.strip_prefix(REMINDER_KEY_PREFIX)
            .and_then(|rest| rest.splitn(2, '_').nth(1))
            .map(|name| name == queue_name)
            .unwrap_or(false)
    }
}

/// Set of alert operations that brings a queue's reminders in line with
/// its schedule. Cancellation always covers the whole queue namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderPlan {
    pub to_cancel: Vec<ReminderJob>,
    pub to_create: Vec<ReminderJob>,
}

pub fn clamp_minutes_before(minutes_before: u32) -> u32 {
    std::cmp::max(minutes_before, MIN_MINUTES_BEFORE)
}

/// Plans the reminders of `queue` for the outages of the day `date`.
///
/// `existing` holds the pending jobs of the queue, all of which get
/// cancelled. One job is created per outage whose reminder time is
/// still strictly after `now`.
pub fn plan_reminders(
    queue: &Queue,
    existing: &[ReminderJob],
    date: NaiveDate,
    intervals: &[OutageInterval],
    minutes_before: u32,
    now: NaiveDateTime,
) -> ReminderPlan {
    let minutes_before = clamp_minutes_before(minutes_before);

    let to_cancel = existing
        .iter()
        .filter(|job| ReminderJob::in_namespace(&job.key, &queue.name))
        .cloned()
        .collect();

    let mut to_create: Vec<ReminderJob> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        let starts_at = date.and_time(interval.from.as_naive_time());
        let fire_at = starts_at - Duration::minutes(minutes_before as i64);
        if fire_at <= now {
            continue;
        }
        let key = ReminderJob::key_for(&queue.name, interval);
        if to_create.iter().any(|job| job.key == key) {
            continue;
        }
        to_create.push(ReminderJob {
            key,
            fire_at,
            queue_id: queue.id.clone(),
            interval_label: interval.label.clone(),
            content: reminder_content(&queue.name, interval, minutes_before),
        });
    }

    ReminderPlan {
        to_cancel,
        to_create,
    }
}

pub fn reminder_content(queue_name: &str, interval: &OutageInterval, minutes_before: u32) -> AlertContent {
    AlertContent {
        title: "⚡ Скоро відключення!".into(),
        body: format!(
            "{}: відключення о {} ({})",
            queue_name,
            interval.from,
            lead_time_phrase(minutes_before)
        ),
    }
}

pub fn schedule_updated_content(queue_name: &str) -> AlertContent {
    AlertContent {
        title: "📊 Графік оновлено!".into(),
        body: format!(
            "Графік для \"{}\" змінився. Натисніть для перегляду.",
            queue_name
        ),
    }
}

/// "через 30 хв", "через 2 год" or "через 1 год 30 хв"
pub fn lead_time_phrase(minutes: u32) -> String {
    if minutes < 60 {
        return format!("через {} хв", minutes);
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("через {} год", hours)
    } else {
        format!("через {} год {} хв", hours, mins)
    }
}
