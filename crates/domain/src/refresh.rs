use crate::day::{DayLabel, ScheduleDays};
use crate::day_resolver::ResolvedDay;
use crate::time_of_day::TimeOfDay;
use crate::view::{PowerStatus, ScheduleView};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Outcome of the last successful refresh of a queue
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchedule {
    pub days: ScheduleDays,
    pub resolved: ResolvedDay,
    /// The local date the days were extracted for
    pub today: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl ResolvedSchedule {
    /// View of `day`, or of the resolved day when `day` is `None`.
    /// Days that are not available to page to give `None`.
    pub fn view(&self, day: Option<DayLabel>, now: &TimeOfDay) -> Option<ScheduleView> {
        let label = day.unwrap_or(self.resolved.label);
        if !self.resolved.available_days.contains(&label) && label != self.resolved.label {
            return None;
        }
        let schedule = self.days.get(label)?;
        Some(ScheduleView::new(
            label,
            schedule,
            self.resolved.available_days.clone(),
            now,
        ))
    }

    /// Calendar date of the resolved day
    pub fn resolved_date(&self) -> NaiveDate {
        self.resolved
            .schedule
            .calendar_date()
            .unwrap_or_else(|| self.today + chrono::Duration::days(self.resolved.label.offset()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPhase {
    Idle,
    Fetching,
    Resolved,
    Failed,
}

/// Refresh bookkeeping of one queue.
///
/// `last_resolved` survives failed refreshes so that reminders can still be
/// reconciled from the latest known schedule, while the display shows
/// the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueRefreshState {
    pub phase: RefreshPhase,
    pub last_resolved: Option<ResolvedSchedule>,
    pub last_error: Option<String>,
}

impl Default for QueueRefreshState {
    fn default() -> Self {
        Self {
            phase: RefreshPhase::Idle,
            last_resolved: None,
            last_error: None,
        }
    }
}

impl QueueRefreshState {
    pub fn is_fetching(&self) -> bool {
        self.phase == RefreshPhase::Fetching
    }

    /// `Idle`, `Resolved` and `Failed` may all start a new fetch
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_fetching() {
            return false;
        }
        self.phase = RefreshPhase::Fetching;
        true
    }

    pub fn resolve(&mut self, schedule: ResolvedSchedule) {
        self.phase = RefreshPhase::Resolved;
        self.last_resolved = Some(schedule);
        self.last_error = None;
    }

    pub fn fail(&mut self, error: String) {
        self.phase = RefreshPhase::Failed;
        self.last_error = Some(error);
    }

    /// The schedule to display. A failed refresh displays nothing.
    pub fn displayed(&self) -> Option<&ResolvedSchedule> {
        match self.phase {
            RefreshPhase::Failed => None,
            _ => self.last_resolved.as_ref(),
        }
    }

    pub fn status(&self, now: &TimeOfDay) -> PowerStatus {
        self.displayed()
            .and_then(|schedule| schedule.view(None, now))
            .map(|view| view.status)
            .unwrap_or_else(PowerStatus::no_data)
    }
}
