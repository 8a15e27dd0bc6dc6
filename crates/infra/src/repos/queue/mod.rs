use super::kv::IKVRepo;
use power_schedule_domain::{Queue, ID};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

const QUEUES_KEY: &str = "saved_queues";

#[async_trait::async_trait]
pub trait IQueueRepo: Send + Sync {
    async fn insert(&self, queue: &Queue) -> anyhow::Result<()>;
    async fn save(&self, queue: &Queue) -> anyhow::Result<()>;
    async fn find(&self, queue_id: &ID) -> Option<Queue>;
    async fn find_all(&self) -> anyhow::Result<Vec<Queue>>;
    async fn delete(&self, queue_id: &ID) -> Option<Queue>;
}

/// Stores all `Queue`s as one JSON array in the key-value store
pub struct KVQueueRepo {
    kv: Arc<dyn IKVRepo>,
    // Serializes read-modify-write cycles on the queue list
    write_lock: Mutex<()>,
}

impl KVQueueRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<Vec<Queue>> {
        match self.kv.get(QUEUES_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(vec![]),
        }
    }

    async fn store(&self, queues: &[Queue]) -> anyhow::Result<()> {
        let json = serde_json::to_string(queues)?;
        self.kv.set(QUEUES_KEY, &json).await
    }
}

#[async_trait::async_trait]
impl IQueueRepo for KVQueueRepo {
    async fn insert(&self, queue: &Queue) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut queues = self.load().await?;
        queues.push(queue.clone());
        self.store(&queues).await
    }

    async fn save(&self, queue: &Queue) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut queues = self.load().await?;
        match queues.iter_mut().find(|q| q.id == queue.id) {
            Some(existing) => *existing = queue.clone(),
            None => return Err(anyhow::Error::msg(format!("Queue {} not found", queue.id))),
        }
        self.store(&queues).await
    }

    async fn find(&self, queue_id: &ID) -> Option<Queue> {
        match self.load().await {
            Ok(queues) => queues.into_iter().find(|q| q.id == *queue_id),
            Err(e) => {
                error!("Unable to load queues. Err: {:?}", e);
                None
            }
        }
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Queue>> {
        self.load().await
    }

    async fn delete(&self, queue_id: &ID) -> Option<Queue> {
        let _guard = self.write_lock.lock().await;
        let mut queues = match self.load().await {
            Ok(queues) => queues,
            Err(e) => {
                error!("Unable to load queues. Err: {:?}", e);
                return None;
            }
        };
        let index = queues.iter().position(|q| q.id == *queue_id)?;
        let deleted = queues.remove(index);
        match self.store(&queues).await {
            Ok(_) => Some(deleted),
            Err(e) => {
                error!("Unable to store queues after delete. Err: {:?}", e);
                None
            }
        }
    }
}
