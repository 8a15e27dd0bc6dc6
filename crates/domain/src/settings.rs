use serde::{Deserialize, Serialize};

pub const UPDATE_INTERVAL_KEY: &str = "updateIntervalMinutes";
pub const NOTIFICATION_MINUTES_BEFORE_KEY: &str = "notificationMinutesBefore";

pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u32 = 15;
pub const DEFAULT_NOTIFICATION_MINUTES_BEFORE: u32 = 30;

/// Update intervals offered to the user
pub const UPDATE_INTERVAL_CHOICES: [u32; 5] = [5, 10, 15, 30, 60];

/// Global user settings shared by all queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub update_interval_minutes: u32,
    pub notification_minutes_before: u32,
}

impl Settings {
    /// Builds settings from stored raw values. Missing, unparseable or
    /// non-positive values fall back to the defaults.
    pub fn from_stored(update_interval: Option<&str>, minutes_before: Option<&str>) -> Self {
        Self {
            update_interval_minutes: parse_positive(update_interval)
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_MINUTES),
            notification_minutes_before: parse_positive(minutes_before)
                .unwrap_or(DEFAULT_NOTIFICATION_MINUTES_BEFORE),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_interval_minutes: DEFAULT_UPDATE_INTERVAL_MINUTES,
            notification_minutes_before: DEFAULT_NOTIFICATION_MINUTES_BEFORE,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}
