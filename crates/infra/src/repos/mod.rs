mod kv;
mod queue;
mod settings;
mod snapshot;

pub use kv::{FileKVRepo, IKVRepo, InMemoryKVRepo};
pub use queue::{IQueueRepo, KVQueueRepo};
pub use settings::SettingsRepo;
pub use snapshot::SnapshotRepo;

use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub kv: Arc<dyn IKVRepo>,
    pub queues: Arc<dyn IQueueRepo>,
    pub snapshots: Arc<SnapshotRepo>,
    pub settings: Arc<SettingsRepo>,
}

impl Repos {
    pub async fn create_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        info!("Opening key value store at {}", path.as_ref().display());
        let kv = FileKVRepo::open(path).await?;
        Ok(Self::with_kv(Arc::new(kv)))
    }

    pub fn create_inmemory() -> Self {
        Self::with_kv(Arc::new(InMemoryKVRepo::new()))
    }

    /// Builds every repo on top of the given key-value store
    pub fn with_kv(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            queues: Arc::new(KVQueueRepo::new(kv.clone())),
            snapshots: Arc::new(SnapshotRepo::new(kv.clone())),
            settings: Arc::new(SettingsRepo::new(kv.clone())),
            kv,
        }
    }
}
