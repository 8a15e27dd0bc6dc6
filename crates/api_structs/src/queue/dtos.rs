use power_schedule_domain::{
    PowerStatus, Queue, QueueRefreshState, RefreshPhase, ScheduleView, SnapshotDiff, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueDTO {
    pub id: ID,
    pub name: String,
    pub queue_id: String,
    pub notifications_enabled: bool,
    pub auto_update_enabled: bool,
}

impl QueueDTO {
    pub fn new(queue: Queue) -> Self {
        Self {
            id: queue.id,
            name: queue.name,
            queue_id: queue.queue_id,
            notifications_enabled: queue.notifications_enabled,
            auto_update_enabled: queue.auto_update_enabled,
        }
    }
}

/// What a presentation client shows for a queue
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueScheduleDTO {
    pub queue: QueueDTO,
    pub state: RefreshPhase,
    pub status: PowerStatus,
    pub schedule: Option<ScheduleView>,
    /// HH:MM of the last successful refresh
    pub updated_at: Option<String>,
    pub error: Option<String>,
}

impl QueueScheduleDTO {
    pub fn new(queue: Queue, state: &QueueRefreshState, schedule: Option<ScheduleView>) -> Self {
        let status = schedule
            .as_ref()
            .map(|view| view.status.clone())
            .unwrap_or_else(PowerStatus::no_data);
        Self {
            queue: QueueDTO::new(queue),
            state: state.phase,
            status,
            schedule,
            updated_at: state
                .displayed()
                .map(|s| s.updated_at.format("%H:%M").to_string()),
            error: state.last_error.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleChangeDTO {
    FirstSeen,
    Changed,
    Unchanged,
}

impl From<SnapshotDiff> for ScheduleChangeDTO {
    fn from(diff: SnapshotDiff) -> Self {
        match diff {
            SnapshotDiff::FirstSeen => Self::FirstSeen,
            SnapshotDiff::Changed => Self::Changed,
            SnapshotDiff::Unchanged => Self::Unchanged,
        }
    }
}

/// Result of one refresh trigger for a queue
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcomeDTO {
    pub queue_id: ID,
    pub state: RefreshPhase,
    /// `None` when the refresh failed, was already in flight or the queue
    /// does not track changes
    pub change: Option<ScheduleChangeDTO>,
    pub error: Option<String>,
}
