mod static_fetcher;

pub use static_fetcher::StaticScheduleFetcher;

use power_schedule_domain::RawScheduleBundle;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Unable to reach the schedule API. Error message: `{0}`")]
    Network(String),
    #[error("No schedule is published for queue `{0}`")]
    NoData(String),
    #[error("Malformed schedule payload. Error message: `{0}`")]
    Parse(String),
}

impl FetchError {
    /// Short tag used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::NoData(_) => "no_data",
            Self::Parse(_) => "parse",
        }
    }
}

#[async_trait::async_trait]
pub trait IScheduleFetcher: Send + Sync {
    async fn fetch_raw_schedule(&self, queue_id: &str) -> Result<RawScheduleBundle, FetchError>;
}

/// Client for the utility's public schedule API
pub struct ScheduleApiClient {
    client: Client,
    base_url: String,
}

impl ScheduleApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleFetcher for ScheduleApiClient {
    async fn fetch_raw_schedule(&self, queue_id: &str) -> Result<RawScheduleBundle, FetchError> {
        let url = format!("{}/schedule-by-queue", self.base_url);
        let res = self
            .client
            .get(&url)
            .query(&[("queue", queue_id)])
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] Schedule API GET error. Error message: {:?}", e);
                FetchError::Network(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "Schedule API responded with status {}",
                status
            )));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let bundle = parse_bundle(&bytes)?;
        debug!(
            "Fetched {} published day(s) for queue {}",
            bundle.days.len(),
            queue_id
        );

        ensure_has_queue(bundle, queue_id)
    }
}

pub fn parse_bundle(bytes: &[u8]) -> Result<RawScheduleBundle, FetchError> {
    serde_json::from_slice::<RawScheduleBundle>(bytes).map_err(|e| FetchError::Parse(e.to_string()))
}

/// An empty payload, or one that never mentions the queue, has no data
pub fn ensure_has_queue(
    bundle: RawScheduleBundle,
    queue_id: &str,
) -> Result<RawScheduleBundle, FetchError> {
    if bundle.is_empty() || !bundle.contains_queue(queue_id) {
        return Err(FetchError::NoData(queue_id.to_string()));
    }
    Ok(bundle)
}
