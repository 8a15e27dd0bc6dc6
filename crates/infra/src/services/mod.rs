mod alerts;
mod schedule_api;

pub use alerts::{AlertError, DeliveredAlert, IAlertCenter, LocalAlertCenter};
pub use schedule_api::{
    FetchError, IScheduleFetcher, ScheduleApiClient, StaticScheduleFetcher,
};

use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub fetcher: Arc<dyn IScheduleFetcher>,
    pub alerts: Arc<dyn IAlertCenter>,
}
