use super::diff_schedule_snapshot::DiffScheduleSnapshotUseCase;
use super::sync_queue_reminders::{SyncQueueRemindersTrigger, SyncQueueRemindersUseCase};
use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use futures::future::join_all;
use power_schedule_api_structs::dtos::RefreshOutcomeDTO;
use power_schedule_api_structs::{refresh_queue, refresh_queues};
use power_schedule_domain::{
    reminder::schedule_updated_content, resolve_day, DaySchedule, ExtractedDays, Queue,
    RefreshPhase, ResolvedSchedule, SnapshotDiff, TimeOfDay, ID,
};
use power_schedule_infra::{AlertError, FetchError, PowerScheduleContext};
use tracing::{debug, error, info, warn};

pub async fn refresh_queue_controller(
    path: web::Path<refresh_queue::PathParams>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let queue = ctx.repos.queues.find(&path.queue_id).await.ok_or_else(|| {
        PowerScheduleError::NotFound(format!(
            "The queue with id: {}, was not found.",
            path.queue_id
        ))
    })?;

    let usecase = RefreshQueueScheduleUseCase {
        queue,
        trigger: RefreshTrigger::Manual,
    };

    execute(usecase, &ctx)
        .await
        .map(|outcome| HttpResponse::Ok().json(refresh_queue::APIResponse::from(outcome)))
        .map_err(PowerScheduleError::from)
}

pub async fn refresh_queues_controller(
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let usecase = RefreshQueuesUseCase {
        trigger: RefreshTrigger::Manual,
    };

    execute(usecase, &ctx)
        .await
        .map(|outcomes| {
            HttpResponse::Ok().json(refresh_queues::APIResponse {
                results: outcomes.into_iter().map(RefreshOutcomeDTO::from).collect(),
            })
        })
        .map_err(PowerScheduleError::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Requested by the user
    Manual,
    /// Periodic update timer, only touches queues with auto update enabled
    Timer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub queue_id: ID,
    pub phase: RefreshPhase,
    pub change: Option<SnapshotDiff>,
    pub error: Option<String>,
}

impl From<RefreshOutcome> for RefreshOutcomeDTO {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            queue_id: outcome.queue_id,
            state: outcome.phase,
            change: outcome.change.map(Into::into),
            error: outcome.error,
        }
    }
}

/// Fetches, resolves and displays the schedule of one `Queue` and
/// reconciles its snapshot and reminders with it.
///
/// Only one refresh per queue runs at a time. A trigger that arrives while a
/// refresh is in flight is dropped.
#[derive(Debug)]
pub struct RefreshQueueScheduleUseCase {
    pub queue: Queue,
    pub trigger: RefreshTrigger,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl RefreshQueueScheduleUseCase {
    fn outcome(
        &self,
        phase: RefreshPhase,
        change: Option<SnapshotDiff>,
        error: Option<String>,
    ) -> RefreshOutcome {
        RefreshOutcome {
            queue_id: self.queue.id.clone(),
            phase,
            change,
            error,
        }
    }

    /// Diffs the published days against the stored snapshot and acts on a
    /// change. The snapshot is written last, so a refresh that does not get
    /// that far is redone by the next one.
    async fn track_changes(
        &self,
        published: &[DaySchedule],
        schedule: &ResolvedSchedule,
        ctx: &PowerScheduleContext,
    ) -> Option<SnapshotDiff> {
        let usecase = DiffScheduleSnapshotUseCase {
            queue_id: &self.queue.id,
            days: published,
        };
        let comparison = execute(usecase, ctx).await.ok()?;

        if comparison.diff == SnapshotDiff::Unchanged {
            return Some(comparison.diff);
        }

        if self.queue.notifications_enabled {
            let usecase = SyncQueueRemindersUseCase {
                request: SyncQueueRemindersTrigger::ScheduleResolved(&self.queue, schedule),
            };
            if let Err(e) = execute(usecase, ctx).await {
                warn!(
                    "Unable to sync reminders of queue {}, retried on the next sync. Err: {:?}",
                    self.queue.name, e
                );
            }
        }

        if comparison.diff == SnapshotDiff::Changed {
            self.announce_update(ctx).await;
        }

        if let Err(e) = ctx
            .repos
            .snapshots
            .save(&self.queue.id, &comparison.snapshot)
            .await
        {
            error!(
                "Unable to store schedule snapshot of queue {}, it is compared again on the next refresh. Err: {:?}",
                self.queue.name, e
            );
        }

        Some(comparison.diff)
    }

    async fn announce_update(&self, ctx: &PowerScheduleContext) {
        info!("Schedule of queue {} changed", self.queue.name);
        if ctx.session.reminders_disabled() {
            return;
        }

        let key = format!("schedule_update_{}", ID::new());
        let content = schedule_updated_content(&self.queue.name);
        match ctx
            .services
            .alerts
            .present_alert(&key, &content, ctx.sys.get_local_datetime())
            .await
        {
            Ok(_) => {}
            Err(AlertError::PermissionDenied) => ctx.session.disable_reminders(),
            Err(e) => warn!("Unable to announce schedule update. Err: {}", e),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RefreshQueueScheduleUseCase {
    type Response = RefreshOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "RefreshQueueSchedule";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let guard = match ctx.session.try_begin_refresh(&self.queue.id) {
            Some(guard) => guard,
            None => {
                debug!("Refresh of queue {} is already in flight", self.queue.name);
                return Ok(self.outcome(RefreshPhase::Fetching, None, None));
            }
        };
        debug!("Refreshing queue {} ({:?})", self.queue.name, self.trigger);

        let now = ctx.sys.get_local_datetime();
        let fetched = ctx
            .services
            .fetcher
            .fetch_raw_schedule(&self.queue.queue_id)
            .await
            .map(|bundle| bundle.extract_days(&self.queue.queue_id, now.date()));

        let ExtractedDays {
            days,
            published,
            skipped,
        } = match fetched {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    "Fetching schedule of queue {} failed. Err: {}", self.queue.name, e
                );
                guard.fail(e.to_string());
                return Ok(self.outcome(RefreshPhase::Failed, None, Some(e.to_string())));
            }
        };
        for e in &skipped {
            warn!(
                "Skipping malformed interval of queue {}. Err: {}",
                self.queue.name, e
            );
        }

        let resolved = match resolve_day(&days, &TimeOfDay::from(now.time())) {
            Some(resolved) => resolved,
            None => {
                let e = FetchError::NoData(self.queue.queue_id.clone());
                warn!(
                    kind = e.kind(),
                    "No schedule around {} for queue {}", now.date(), self.queue.name
                );
                guard.fail(e.to_string());
                return Ok(self.outcome(RefreshPhase::Failed, None, Some(e.to_string())));
            }
        };

        let schedule = ResolvedSchedule {
            days,
            resolved,
            today: now.date(),
            updated_at: now,
        };

        let change = if self.queue.auto_update_enabled {
            self.track_changes(&published, &schedule, ctx).await
        } else {
            None
        };

        guard.resolve(schedule);
        Ok(self.outcome(RefreshPhase::Resolved, change, None))
    }
}

/// Refreshes several queues concurrently
#[derive(Debug)]
pub struct RefreshQueuesUseCase {
    pub trigger: RefreshTrigger,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RefreshQueuesUseCase {
    type Response = Vec<RefreshOutcome>;

    type Error = UseCaseError;

    const NAME: &'static str = "RefreshQueues";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let queues = ctx.repos.queues.find_all().await.map_err(|e| {
            error!("Unable to load queues for refresh. Err: {:?}", e);
            UseCaseError::StorageError
        })?;

        let trigger = self.trigger;
        let refreshes = queues
            .into_iter()
            .filter(|queue| trigger == RefreshTrigger::Manual || queue.auto_update_enabled)
            .map(|queue| execute(RefreshQueueScheduleUseCase { queue, trigger }, ctx));

        let outcomes = join_all(refreshes)
            .await
            .into_iter()
            .filter_map(|res| res.ok())
            .collect();
        Ok(outcomes)
    }
}
