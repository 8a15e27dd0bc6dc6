use crate::schedule::{DeliverDueRemindersUseCase, RefreshQueuesUseCase, RefreshTrigger};
use crate::schedule::sync_queue_reminders::{SyncQueueRemindersTrigger, SyncQueueRemindersUseCase};
use crate::settings::GetSettingsUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep, sleep_until, Instant};
use chrono::Timelike;
use power_schedule_domain::DEFAULT_UPDATE_INTERVAL_MINUTES;
use power_schedule_infra::PowerScheduleContext;
use std::time::Duration;
use tracing::debug;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Refreshes every queue with auto update enabled, then waits for the
/// update interval the user has currently chosen.
pub fn start_refresh_job_scheduler(ctx: PowerScheduleContext) {
    actix_web::rt::spawn(async move {
        loop {
            let context = ctx.clone();
            // A slow fetch must not hold back the next tick
            actix_web::rt::spawn(async move {
                let usecase = RefreshQueuesUseCase {
                    trigger: RefreshTrigger::Timer,
                };
                let _ = execute(usecase, &context).await;
            });

            let minutes = execute(GetSettingsUseCase {}, &ctx)
                .await
                .map(|settings| settings.update_interval_minutes)
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_MINUTES);
            debug!("Next schedule refresh in {} minutes", minutes);
            sleep(Duration::from_secs(minutes as u64 * 60)).await;
        }
    });
}

pub fn start_reminders_sync_job_scheduler(ctx: PowerScheduleContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.reminders_sync_interval_minutes * 60);
        let mut interval = interval(period);
        loop {
            interval.tick().await;

            let usecase = SyncQueueRemindersUseCase {
                request: SyncQueueRemindersTrigger::JobScheduler,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

pub fn start_deliver_reminders_job(ctx: PowerScheduleContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_local_datetime().time();
        let now_ts = now.num_seconds_from_midnight() as usize * 1000;
        let secs_to_next_run = get_start_delay(now_ts, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _ = execute(DeliverDueRemindersUseCase {}, &context).await;
            });
        }
    });
}
