use crate::shared::usecase::UseCase;
use power_schedule_domain::{reminder::plan_reminders, Queue, ResolvedSchedule, Settings};
use power_schedule_infra::{AlertError, PowerScheduleContext};
use tracing::{debug, error, info, warn};

/// Brings the pending reminders of a `Queue` in line with its schedule
#[derive(Debug)]
pub struct SyncQueueRemindersUseCase<'a> {
    pub request: SyncQueueRemindersTrigger<'a>,
}

#[derive(Debug)]
pub enum SyncQueueRemindersTrigger<'a> {
    /// A schedule was resolved that differs from the stored snapshot, or
    /// there was no stored snapshot yet
    ScheduleResolved(&'a Queue, &'a ResolvedSchedule),
    /// Notifications were switched on for the `Queue`
    NotificationsEnabled(&'a Queue),
    /// Periodic job scheduler that re-syncs every `Queue` with notifications
    /// enabled from its last resolved schedule
    JobScheduler,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReminderSyncSummary {
    pub cancelled: usize,
    pub created: usize,
    pub skipped: usize,
}

impl ReminderSyncSummary {
    fn add(&mut self, other: ReminderSyncSummary) {
        self.cancelled += other.cancelled;
        self.created += other.created;
        self.skipped += other.skipped;
    }
}

async fn load_settings(ctx: &PowerScheduleContext) -> Settings {
    match ctx.repos.settings.get().await {
        Ok(settings) => settings,
        Err(e) => {
            error!("Unable to read settings, using defaults. Err: {:?}", e);
            Settings::default()
        }
    }
}

/// Cancels every pending reminder of `queue` and schedules one per outage of
/// the resolved day whose reminder time is still ahead.
async fn sync_queue_reminders(
    queue: &Queue,
    schedule: &ResolvedSchedule,
    settings: &Settings,
    ctx: &PowerScheduleContext,
) -> ReminderSyncSummary {
    let alerts = &ctx.services.alerts;
    let existing = alerts.pending_alerts_matching(&queue.name).await;
    let plan = plan_reminders(
        queue,
        &existing,
        schedule.resolved_date(),
        &schedule.resolved.schedule.intervals,
        settings.notification_minutes_before,
        ctx.sys.get_local_datetime(),
    );

    let mut summary = ReminderSyncSummary {
        cancelled: alerts.cancel_alerts_matching(&queue.name).await.len(),
        ..Default::default()
    };

    if ctx.session.reminders_disabled() {
        debug!(
            "Reminders are disabled, not scheduling {} reminder(s) for queue {}",
            plan.to_create.len(),
            queue.name
        );
        summary.skipped = plan.to_create.len();
        return summary;
    }

    for job in &plan.to_create {
        match alerts.schedule_local_alert(job).await {
            Ok(_) => {
                debug!("Scheduled reminder {} at {}", job.key, job.fire_at);
                summary.created += 1;
            }
            Err(e) => {
                warn!("Skipping reminder {} for queue {}. Err: {}", job.key, queue.name, e);
                if e == AlertError::PermissionDenied {
                    ctx.session.disable_reminders();
                }
                summary.skipped += 1;
            }
        }
    }

    summary
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncQueueRemindersUseCase<'a> {
    type Response = ReminderSyncSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncQueueReminders";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let settings = load_settings(ctx).await;

        match &self.request {
            SyncQueueRemindersTrigger::ScheduleResolved(queue, schedule) => {
                Ok(sync_queue_reminders(queue, schedule, &settings, ctx).await)
            }
            SyncQueueRemindersTrigger::NotificationsEnabled(queue) => {
                match ctx.session.refresh_state(&queue.id).last_resolved {
                    Some(schedule) => Ok(sync_queue_reminders(queue, &schedule, &settings, ctx).await),
                    None => {
                        debug!("Queue {} has no resolved schedule yet", queue.name);
                        Ok(ReminderSyncSummary::default())
                    }
                }
            }
            SyncQueueRemindersTrigger::JobScheduler => {
                let queues = ctx.repos.queues.find_all().await.map_err(|e| {
                    error!("Unable to load queues for reminder sync. Err: {:?}", e);
                    UseCaseError::StorageError
                })?;

                let mut summary = ReminderSyncSummary::default();
                for queue in queues.iter().filter(|q| q.notifications_enabled) {
                    if let Some(schedule) = ctx.session.refresh_state(&queue.id).last_resolved {
                        summary.add(sync_queue_reminders(queue, &schedule, &settings, ctx).await);
                    }
                }
                info!(
                    "Reminder sync done. Created: {}, cancelled: {}, skipped: {}",
                    summary.created, summary.cancelled, summary.skipped
                );
                Ok(summary)
            }
        }
    }
}
