use chrono::{NaiveDate, NaiveDateTime};
use power_schedule_domain::{RawDaySchedule, RawInterval};
use power_schedule_infra::{LocalAlertCenter, PowerScheduleContext, StaticScheduleFetcher, StaticTimeSys};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct TestContext {
    pub ctx: PowerScheduleContext,
    pub sys: Arc<StaticTimeSys>,
    pub fetcher: Arc<StaticScheduleFetcher>,
    pub alerts: Arc<LocalAlertCenter>,
}

pub fn at(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%d.%m.%Y")
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn setup_context(now: NaiveDateTime) -> TestContext {
    let mut ctx = PowerScheduleContext::create_inmemory();
    let sys = Arc::new(StaticTimeSys::new(now));
    let fetcher = Arc::new(StaticScheduleFetcher::new());
    let alerts = Arc::new(LocalAlertCenter::new(true));
    ctx.sys = sys.clone();
    ctx.services.fetcher = fetcher.clone();
    ctx.services.alerts = alerts.clone();
    TestContext {
        ctx,
        sys,
        fetcher,
        alerts,
    }
}

pub fn raw_day(date: &str, queue_id: &str, intervals: &[(&str, &str)]) -> RawDaySchedule {
    let mut queues = BTreeMap::new();
    queues.insert(
        queue_id.to_string(),
        intervals
            .iter()
            .map(|(from, to)| RawInterval {
                from: from.to_string(),
                to: to.to_string(),
                shutdown_hours: format!("{}-{}", from, to),
            })
            .collect(),
    );
    RawDaySchedule {
        event_date: date.into(),
        created_at: "09.12.2025 21:14".into(),
        schedule_approved_since: "09.12.2025 21:00".into(),
        queues,
    }
}
