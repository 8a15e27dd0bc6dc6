use tracing::{info, warn};

const DEFAULT_SCHEDULE_API_BASE_URL: &str = "https://be-svitlo.oe.if.ua";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Base url of the public outage schedule API
    pub schedule_api_base_url: String,
    /// Path of the JSON file backing the key-value store. When not set
    /// everything is kept in memory and lost on restart.
    pub data_path: Option<String>,
    /// Whether the user allowed local alerts
    pub notifications_permission_granted: bool,
    /// How often pending reminders of every queue are re-synced
    pub reminders_sync_interval_minutes: u64,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let schedule_api_base_url = match std::env::var("SCHEDULE_API_BASE_URL") {
            Ok(url) => url,
            Err(_) => {
                info!(
                    "Did not find SCHEDULE_API_BASE_URL environment variable. Using: {}",
                    DEFAULT_SCHEDULE_API_BASE_URL
                );
                DEFAULT_SCHEDULE_API_BASE_URL.to_string()
            }
        };

        let data_path = std::env::var("POWER_SCHEDULE_DATA_PATH").ok();
        if data_path.is_none() {
            info!("Did not find POWER_SCHEDULE_DATA_PATH environment variable. Storage is in memory only.");
        }

        let notifications_permission_granted = match std::env::var("NOTIFICATIONS_PERMISSION") {
            Ok(value) => match value.to_lowercase().as_str() {
                "granted" | "true" | "1" => true,
                "denied" | "false" | "0" => false,
                _ => {
                    warn!(
                        "The given NOTIFICATIONS_PERMISSION: {} is not valid, treating it as granted.",
                        value
                    );
                    true
                }
            },
            Err(_) => true,
        };

        Self {
            port,
            schedule_api_base_url,
            data_path,
            notifications_permission_granted,
            reminders_sync_interval_minutes: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
