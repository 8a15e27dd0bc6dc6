use super::{ensure_has_queue, FetchError, IScheduleFetcher};
use power_schedule_domain::RawScheduleBundle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Fetcher serving preloaded responses, used when testing
pub struct StaticScheduleFetcher {
    responses: Mutex<HashMap<String, Result<RawScheduleBundle, FetchError>>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl StaticScheduleFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_bundle(&self, bundle: RawScheduleBundle) {
        let mut responses = self.responses.lock().unwrap();
        let queue_ids = bundle
            .days
            .iter()
            .flat_map(|d| d.queues.keys().cloned())
            .collect::<Vec<_>>();
        for queue_id in queue_ids {
            responses.insert(queue_id, Ok(bundle.clone()));
        }
    }

    pub fn set_error(&self, queue_id: &str, error: FetchError) {
        self.responses
            .lock()
            .unwrap()
            .insert(queue_id.to_string(), Err(error));
    }

    /// Every fetch sleeps this long before answering
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StaticScheduleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IScheduleFetcher for StaticScheduleFetcher {
    async fn fetch_raw_schedule(&self, queue_id: &str) -> Result<RawScheduleBundle, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.lock().unwrap().get(queue_id).cloned();
        match response {
            Some(Ok(bundle)) => ensure_has_queue(bundle, queue_id),
            Some(Err(e)) => Err(e),
            None => Err(FetchError::NoData(queue_id.to_string())),
        }
    }
}
