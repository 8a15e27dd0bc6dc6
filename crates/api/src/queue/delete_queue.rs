use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::delete_queue::*;
use power_schedule_domain::{Queue, ID};
use power_schedule_infra::PowerScheduleContext;
use tracing::error;

pub async fn delete_queue_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let usecase = DeleteQueueUseCase {
        queue_id: path.queue_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|queue| HttpResponse::Ok().json(APIResponse::new(queue)))
        .map_err(PowerScheduleError::from)
}

/// Deletes a `Queue` together with its reminders, snapshot and
/// cached schedule
#[derive(Debug)]
pub struct DeleteQueueUseCase {
    pub queue_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(queue_id) => Self::NotFound(format!(
                "The queue with id: {}, was not found.",
                queue_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteQueueUseCase {
    type Response = Queue;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteQueue";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let queue = ctx
            .repos
            .queues
            .delete(&self.queue_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.queue_id.clone()))?;

        ctx.services.alerts.cancel_alerts_matching(&queue.name).await;
        if let Err(e) = ctx.repos.snapshots.delete(&queue.id).await {
            error!(
                "Unable to delete schedule snapshot of queue {}. Err: {:?}",
                queue.id, e
            );
        }
        ctx.session.forget_queue(&queue.id);

        Ok(queue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schedule::{RefreshQueuesUseCase, RefreshTrigger};
    use crate::shared::test_utils::{at, raw_day, setup_context};
    use power_schedule_domain::{RawScheduleBundle, RefreshPhase};

    #[actix_web::main]
    #[test]
    async fn it_removes_everything_of_the_queue() {
        let test = setup_context(at("10.12.2025", 9, 0));
        let mut home = Queue::new("Дім".into(), "5.2".into());
        home.notifications_enabled = true;
        let mut office = Queue::new("Офіс".into(), "1.1".into());
        office.notifications_enabled = true;
        test.ctx.repos.queues.insert(&home).await.unwrap();
        test.ctx.repos.queues.insert(&office).await.unwrap();
        test.fetcher.set_bundle(RawScheduleBundle::new(vec![
            raw_day("10.12.2025", "5.2", &[("10:00", "12:00")]),
            raw_day("10.12.2025", "1.1", &[("14:00", "16:00")]),
        ]));
        let mut refresh = RefreshQueuesUseCase {
            trigger: RefreshTrigger::Manual,
        };
        refresh.execute(&test.ctx).await.unwrap();
        assert_eq!(test.alerts.pending().len(), 2);

        let mut usecase = DeleteQueueUseCase {
            queue_id: home.id.clone(),
        };
        assert_eq!(usecase.execute(&test.ctx).await.unwrap(), home);

        assert_eq!(test.ctx.repos.queues.find_all().await.unwrap(), vec![office.clone()]);
        assert!(test.ctx.repos.snapshots.find(&home.id).await.unwrap().is_none());
        assert!(test.ctx.repos.snapshots.find(&office.id).await.unwrap().is_some());
        assert_eq!(
            test.ctx.session.refresh_state(&home.id).phase,
            RefreshPhase::Idle
        );
        let pending = test.alerts.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].key, "shutdown_14:00_Офіс");

        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
