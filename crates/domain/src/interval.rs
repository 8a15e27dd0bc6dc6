use crate::time_of_day::{InvalidTimeOfDay, TimeOfDay, MINUTES_PER_DAY};
use serde::{Deserialize, Serialize};

/// One contiguous outage window within a single calendar day.
///
/// `to` at or before `from` means the outage runs through the end of
/// the day. It never spills into the next day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageInterval {
    pub from: TimeOfDay,
    pub to: TimeOfDay,
    /// Display string published alongside the interval, e.g. "14:00-16:00"
    pub label: String,
}

impl OutageInterval {
    pub fn new(from: TimeOfDay, to: TimeOfDay, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }

    pub fn parse(from: &str, to: &str, label: &str) -> Result<Self, InvalidTimeOfDay> {
        Ok(Self::new(from.parse()?, to.parse()?, label))
    }

    pub fn crosses_midnight(&self) -> bool {
        self.to.minute_of_day() <= self.from.minute_of_day()
    }

    /// Minute value of `to` with the midnight wraparound applied.
    /// Lies in `(from, from + 1440]`.
    pub fn end_minute(&self) -> u32 {
        if self.crosses_midnight() {
            self.to.minute_of_day() + MINUTES_PER_DAY
        } else {
            self.to.minute_of_day()
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute() - self.from.minute_of_day()
    }

    /// Whether `instant` falls in `[from, to)` of this interval's own day.
    pub fn contains(&self, instant: &TimeOfDay) -> bool {
        let now = instant.minute_of_day();
        now >= self.from.minute_of_day() && now < self.end_minute()
    }
}

/// Earliest start first, ties broken by the earliest end.
pub fn sort_by_start(intervals: &mut [OutageInterval]) {
    intervals.sort_by(|i1, i2| {
        i1.from
            .cmp(&i2.from)
            .then_with(|| i1.end_minute().cmp(&i2.end_minute()))
    });
}
