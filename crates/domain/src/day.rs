use crate::interval::OutageInterval;
use crate::time_of_day::TimeOfDay;
use crate::timeline::{self, OutageTotal, Timeline};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_date(datestr: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(datestr.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The published outage windows of one queue for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// DD.MM.YYYY
    pub date: String,
    pub published_at: String,
    pub approved_since: String,
    pub intervals: Vec<OutageInterval>,
}

impl DaySchedule {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn timeline(&self) -> Timeline {
        timeline::build_timeline(&self.intervals)
    }

    pub fn current_outage(&self, now: &TimeOfDay) -> Option<&OutageInterval> {
        timeline::current_outage(&self.intervals, now)
    }

    pub fn next_outage(&self, now: &TimeOfDay) -> Option<&OutageInterval> {
        timeline::next_outage(&self.intervals, now)
    }

    pub fn has_upcoming(&self, now: &TimeOfDay) -> bool {
        timeline::has_upcoming(&self.intervals, now)
    }

    pub fn total_outage(&self) -> OutageTotal {
        timeline::total_outage(&self.intervals)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayLabel {
    Yesterday,
    Today,
    Tomorrow,
}

impl DayLabel {
    /// Calendar day offset relative to today
    pub fn offset(&self) -> i64 {
        match self {
            Self::Yesterday => -1,
            Self::Today => 0,
            Self::Tomorrow => 1,
        }
    }
}

#[derive(Error, Debug)]
#[error("Day: `{0}` is not one of yesterday, today or tomorrow")]
pub struct InvalidDayLabel(String);

impl FromStr for DayLabel {
    type Err = InvalidDayLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yesterday" => Ok(Self::Yesterday),
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            _ => Err(InvalidDayLabel(s.to_string())),
        }
    }
}

impl Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Yesterday => "yesterday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        };
        write!(f, "{}", label)
    }
}

/// The schedules of a queue around the current day. A missing day means
/// nothing was published for the queue on that date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleDays {
    pub yesterday: Option<DaySchedule>,
    pub today: Option<DaySchedule>,
    pub tomorrow: Option<DaySchedule>,
}

impl ScheduleDays {
    pub fn get(&self, label: DayLabel) -> Option<&DaySchedule> {
        match label {
            DayLabel::Yesterday => self.yesterday.as_ref(),
            DayLabel::Today => self.today.as_ref(),
            DayLabel::Tomorrow => self.tomorrow.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.yesterday.is_none() && self.today.is_none() && self.tomorrow.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_published_dates() {
        assert_eq!(
            parse_date("05.12.2025"),
            Some(NaiveDate::from_ymd_opt(2025, 12, 5).unwrap())
        );
        assert_eq!(parse_date("2025-12-05"), None);
        assert_eq!(parse_date("31.02.2025"), None);
        assert_eq!(
            format_date(&NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()),
            "09.01.2026"
        );
    }

    #[test]
    fn day_labels_round_trip_through_strings() {
        for label in &[DayLabel::Yesterday, DayLabel::Today, DayLabel::Tomorrow] {
            assert_eq!(label.to_string().parse::<DayLabel>().unwrap(), *label);
        }
        assert!("later".parse::<DayLabel>().is_err());
    }
}
