mod config;
mod repos;
mod services;
mod session;
mod system;

pub use config::Config;
pub use repos::{FileKVRepo, IKVRepo, IQueueRepo, InMemoryKVRepo, Repos};
pub use services::*;
pub use session::{RefreshGuard, Session};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct PowerScheduleContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
    pub session: Arc<Session>,
}

impl PowerScheduleContext {
    fn create(repos: Repos, config: Config) -> Self {
        let services = Services {
            fetcher: Arc::new(ScheduleApiClient::new(&config.schedule_api_base_url)),
            alerts: Arc::new(LocalAlertCenter::new(
                config.notifications_permission_granted,
            )),
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            services,
            session: Arc::new(Session::new()),
        }
    }

    /// Context with in-memory storage and a static schedule fetcher.
    /// Used when testing.
    pub fn create_inmemory() -> Self {
        let mut ctx = Self::create(Repos::create_inmemory(), Config::new());
        ctx.services.fetcher = Arc::new(StaticScheduleFetcher::new());
        ctx
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PowerScheduleContext> {
    let config = Config::new();
    let repos = match &config.data_path {
        Some(path) => Repos::create_file(path).await?,
        None => Repos::create_inmemory(),
    };
    Ok(PowerScheduleContext::create(repos, config))
}
