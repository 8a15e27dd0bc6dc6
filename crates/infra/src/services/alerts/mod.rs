use chrono::NaiveDateTime;
use power_schedule_domain::{AlertContent, ReminderJob};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    #[error("Notification permission was not granted")]
    PermissionDenied,
    #[error("Unable to schedule alert. Error message: `{0}`")]
    SchedulingError(String),
}

/// An alert that has been handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredAlert {
    pub key: String,
    pub delivered_at: NaiveDateTime,
    pub content: AlertContent,
}

/// Local alert delivery. Scheduling a job with a key that is already
/// pending replaces the earlier job.
#[async_trait::async_trait]
pub trait IAlertCenter: Send + Sync {
    async fn schedule_local_alert(&self, job: &ReminderJob) -> Result<(), AlertError>;
    /// Shows an alert right away
    async fn present_alert(
        &self,
        key: &str,
        content: &AlertContent,
        now: NaiveDateTime,
    ) -> Result<(), AlertError>;
    /// Pending reminders of the queue named `queue_name`
    async fn pending_alerts_matching(&self, queue_name: &str) -> Vec<ReminderJob>;
    /// Cancels the pending reminders of the queue named `queue_name`
    async fn cancel_alerts_matching(&self, queue_name: &str) -> Vec<ReminderJob>;
    async fn cancel_alert(&self, key: &str) -> Option<ReminderJob>;
    /// Removes and delivers every pending reminder due at `now`
    async fn deliver_due(&self, now: NaiveDateTime) -> Vec<DeliveredAlert>;
}

/// In-process alert book. Delivery hands alerts to the log.
pub struct LocalAlertCenter {
    permission_granted: bool,
    pending: Mutex<BTreeMap<String, ReminderJob>>,
    delivered: Mutex<Vec<DeliveredAlert>>,
}

impl LocalAlertCenter {
    pub fn new(permission_granted: bool) -> Self {
        Self {
            permission_granted,
            pending: Mutex::new(BTreeMap::new()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn pending(&self) -> Vec<ReminderJob> {
        self.pending.lock().unwrap().values().cloned().collect()
    }

    pub fn delivered(&self) -> Vec<DeliveredAlert> {
        self.delivered.lock().unwrap().clone()
    }

    fn deliver(&self, alert: DeliveredAlert) {
        info!(
            "Delivering alert {} at {}: {} {}",
            alert.key, alert.delivered_at, alert.content.title, alert.content.body
        );
        self.delivered.lock().unwrap().push(alert);
    }
}

#[async_trait::async_trait]
impl IAlertCenter for LocalAlertCenter {
    async fn schedule_local_alert(&self, job: &ReminderJob) -> Result<(), AlertError> {
        if !self.permission_granted {
            return Err(AlertError::PermissionDenied);
        }
        self.pending
            .lock()
            .unwrap()
            .insert(job.key.clone(), job.clone());
        Ok(())
    }

    async fn present_alert(
        &self,
        key: &str,
        content: &AlertContent,
        now: NaiveDateTime,
    ) -> Result<(), AlertError> {
        if !self.permission_granted {
            return Err(AlertError::PermissionDenied);
        }
        self.deliver(DeliveredAlert {
            key: key.to_string(),
            delivered_at: now,
            content: content.clone(),
        });
        Ok(())
    }

    async fn pending_alerts_matching(&self, queue_name: &str) -> Vec<ReminderJob> {
        self.pending
            .lock()
            .unwrap()
            .values()
            .filter(|job| ReminderJob::in_namespace(&job.key, queue_name))
            .cloned()
            .collect()
    }

    async fn cancel_alerts_matching(&self, queue_name: &str) -> Vec<ReminderJob> {
        let mut pending = self.pending.lock().unwrap();
        let keys = pending
            .keys()
            .filter(|key| ReminderJob::in_namespace(key, queue_name))
            .cloned()
            .collect::<Vec<_>>();
        keys.iter().filter_map(|key| pending.remove(key)).collect()
    }

    async fn cancel_alert(&self, key: &str) -> Option<ReminderJob> {
        self.pending.lock().unwrap().remove(key)
    }

    async fn deliver_due(&self, now: NaiveDateTime) -> Vec<DeliveredAlert> {
        let due = {
            let mut pending = self.pending.lock().unwrap();
            let keys = pending
                .values()
                .filter(|job| job.fire_at <= now)
                .map(|job| job.key.clone())
                .collect::<Vec<_>>();
            keys.iter()
                .filter_map(|key| pending.remove(key))
                .collect::<Vec<_>>()
        };

        let mut delivered = Vec::with_capacity(due.len());
        for job in due {
            let alert = DeliveredAlert {
                key: job.key,
                delivered_at: now,
                content: job.content,
            };
            self.deliver(alert.clone());
            delivered.push(alert);
        }
        delivered
    }
}
