use crate::dtos::SettingsDTO;
use power_schedule_domain::Settings;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct SettingsResponse {
    pub settings: SettingsDTO,
}

impl SettingsResponse {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: SettingsDTO::new(settings),
        }
    }
}

pub mod get_settings {
    use super::*;

    pub type APIResponse = SettingsResponse;
}

pub mod update_settings {
    use super::*;

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub update_interval_minutes: Option<u32>,
        #[serde(default)]
        pub notification_minutes_before: Option<u32>,
    }

    pub type APIResponse = SettingsResponse;
}
