use crate::shared::usecase::UseCase;
use power_schedule_domain::{DaySchedule, ScheduleSnapshot, SnapshotDiff, ID};
use power_schedule_infra::PowerScheduleContext;
use tracing::error;

/// Compares the freshly published days against the snapshot stored for the
/// `Queue`. Storing the new snapshot is left to the caller.
#[derive(Debug)]
pub struct DiffScheduleSnapshotUseCase<'a> {
    pub queue_id: &'a ID,
    pub days: &'a [DaySchedule],
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotComparison {
    pub diff: SnapshotDiff,
    pub snapshot: ScheduleSnapshot,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for DiffScheduleSnapshotUseCase<'a> {
    type Response = SnapshotComparison;

    type Error = UseCaseError;

    const NAME: &'static str = "DiffScheduleSnapshot";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let stored = ctx.repos.snapshots.find(self.queue_id).await.map_err(|e| {
            error!(
                "Unable to read schedule snapshot of queue {}. Err: {:?}",
                self.queue_id, e
            );
            UseCaseError::StorageError
        })?;

        let snapshot = ScheduleSnapshot::from_days(self.days);
        Ok(SnapshotComparison {
            diff: SnapshotDiff::compare(stored.as_ref(), &snapshot),
            snapshot,
        })
    }
}
