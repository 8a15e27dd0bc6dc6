use super::kv::IKVRepo;
use power_schedule_domain::{Settings, NOTIFICATION_MINUTES_BEFORE_KEY, UPDATE_INTERVAL_KEY};
use std::sync::Arc;

pub struct SettingsRepo {
    kv: Arc<dyn IKVRepo>,
}

impl SettingsRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self { kv }
    }

    pub async fn get(&self) -> anyhow::Result<Settings> {
        let update_interval = self.kv.get(UPDATE_INTERVAL_KEY).await?;
        let minutes_before = self.kv.get(NOTIFICATION_MINUTES_BEFORE_KEY).await?;
        Ok(Settings::from_stored(
            update_interval.as_deref(),
            minutes_before.as_deref(),
        ))
    }

    pub async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        self.kv
            .set(
                UPDATE_INTERVAL_KEY,
                &settings.update_interval_minutes.to_string(),
            )
            .await?;
        self.kv
            .set(
                NOTIFICATION_MINUTES_BEFORE_KEY,
                &settings.notification_minutes_before.to_string(),
            )
            .await
    }
}
