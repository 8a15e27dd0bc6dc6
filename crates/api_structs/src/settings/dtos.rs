use power_schedule_domain::{Settings, UPDATE_INTERVAL_CHOICES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDTO {
    pub update_interval_minutes: u32,
    pub notification_minutes_before: u32,
    pub update_interval_choices: Vec<u32>,
}

impl SettingsDTO {
    pub fn new(settings: Settings) -> Self {
        Self {
            update_interval_minutes: settings.update_interval_minutes,
            notification_minutes_before: settings.notification_minutes_before,
            update_interval_choices: UPDATE_INTERVAL_CHOICES.to_vec(),
        }
    }
}
