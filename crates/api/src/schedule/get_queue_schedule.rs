use super::refresh_queue_schedule::{RefreshQueueScheduleUseCase, RefreshTrigger};
use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::dtos::QueueScheduleDTO;
use power_schedule_api_structs::get_queue_schedule::*;
use power_schedule_domain::{DayLabel, Queue, QueueRefreshState, RefreshPhase, ScheduleView, TimeOfDay, ID};
use power_schedule_infra::PowerScheduleContext;
use tracing::warn;

pub async fn get_queue_schedule_controller(
    path: web::Path<PathParams>,
    query: web::Query<QueryParams>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let usecase = GetQueueScheduleUseCase {
        queue_id: path.queue_id.clone(),
        day: query.day,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.queue, &res.state, res.schedule))
        })
        .map_err(PowerScheduleError::from)
}

/// View of one day of a queue's schedule at the current time. A queue that
/// has never been refreshed is refreshed first.
#[derive(Debug)]
pub struct GetQueueScheduleUseCase {
    pub queue_id: ID,
    pub day: Option<DayLabel>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub queue: Queue,
    pub state: QueueRefreshState,
    pub schedule: Option<ScheduleView>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    DayNotAvailable(DayLabel),
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(queue_id) => Self::NotFound(format!(
                "The queue with id: {}, was not found.",
                queue_id
            )),
            UseCaseError::DayNotAvailable(day) => Self::NotFound(format!(
                "There is no schedule for {} to show.",
                day
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetQueueScheduleUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetQueueSchedule";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let queue = ctx
            .repos
            .queues
            .find(&self.queue_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.queue_id.clone()))?;

        if ctx.session.refresh_state(&queue.id).phase == RefreshPhase::Idle {
            let usecase = RefreshQueueScheduleUseCase {
                queue: queue.clone(),
                trigger: RefreshTrigger::Manual,
            };
            if let Err(e) = execute(usecase, ctx).await {
                warn!("Unable to refresh queue {} before display. Err: {:?}", queue.name, e);
            }
        }

        let state = ctx.session.refresh_state(&queue.id);
        let now = TimeOfDay::from(ctx.sys.get_local_datetime().time());
        let schedule = match (state.displayed(), self.day) {
            (Some(resolved), Some(day)) => Some(
                resolved
                    .view(Some(day), &now)
                    .ok_or(UseCaseError::DayNotAvailable(day))?,
            ),
            (Some(resolved), None) => resolved.view(None, &now),
            (None, Some(day)) => return Err(UseCaseError::DayNotAvailable(day)),
            (None, None) => None,
        };

        Ok(UseCaseResponse {
            queue,
            state,
            schedule,
        })
    }
}
