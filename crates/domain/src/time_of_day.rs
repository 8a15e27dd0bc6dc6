use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Local wall-clock time with minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTimeOfDay {
    #[error("Time: `{0}` is not formatted as HH:MM")]
    Malformed(String),
    #[error("Time: `{0}` is out of range")]
    OutOfRange(String),
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::new(minutes / 60, minutes % 60)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Plain minute-of-day comparison. Only meaningful within a single day.
    pub fn is_before(&self, other: &TimeOfDay) -> bool {
        self.minute_of_day() < other.minute_of_day()
    }

    pub fn as_naive_time(&self) -> chrono::NaiveTime {
        // hour and minute are range checked on construction
        chrono::NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl From<chrono::NaiveTime> for TimeOfDay {
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts = trimmed.split(':').collect::<Vec<_>>();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty() || p.len() > 2) {
            return Err(InvalidTimeOfDay::Malformed(s.to_string()));
        }
        let hour = parts[0]
            .parse::<u32>()
            .map_err(|_| InvalidTimeOfDay::Malformed(s.to_string()))?;
        let minute = parts[1]
            .parse::<u32>()
            .map_err(|_| InvalidTimeOfDay::Malformed(s.to_string()))?;

        Self::new(hour, minute).ok_or_else(|| InvalidTimeOfDay::OutOfRange(s.to_string()))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time of day formatted as HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeOfDay>()
                    .map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}
