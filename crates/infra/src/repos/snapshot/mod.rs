use super::kv::IKVRepo;
use power_schedule_domain::{ScheduleSnapshot, ID};
use std::sync::Arc;

/// Last seen schedule snapshot per `Queue`
pub struct SnapshotRepo {
    kv: Arc<dyn IKVRepo>,
}

fn snapshot_key(queue_id: &ID) -> String {
    format!("schedule_{}", queue_id)
}

impl SnapshotRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self { kv }
    }

    pub async fn find(&self, queue_id: &ID) -> anyhow::Result<Option<ScheduleSnapshot>> {
        let stored = self.kv.get(&snapshot_key(queue_id)).await?;
        Ok(stored.map(ScheduleSnapshot::from_stored))
    }

    pub async fn save(&self, queue_id: &ID, snapshot: &ScheduleSnapshot) -> anyhow::Result<()> {
        self.kv.set(&snapshot_key(queue_id), snapshot.as_str()).await
    }

    pub async fn delete(&self, queue_id: &ID) -> anyhow::Result<()> {
        self.kv.delete(&snapshot_key(queue_id)).await
    }
}
