use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::add_queue::*;
use power_schedule_domain::{Queue, QueueValidationError};
use power_schedule_infra::PowerScheduleContext;
use tracing::error;

pub async fn add_queue_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let body = body.0;
    let usecase = AddQueueUseCase {
        name: body.name,
        queue_id: body.queue_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|queue| HttpResponse::Created().json(APIResponse::new(queue)))
        .map_err(PowerScheduleError::from)
}

#[derive(Debug)]
pub struct AddQueueUseCase {
    pub name: String,
    pub queue_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidQueue(QueueValidationError),
    NameTaken(String),
    StorageError,
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidQueue(e) => Self::BadClientData(e.to_string()),
            UseCaseError::NameTaken(name) => Self::Conflict(format!(
                "A queue named `{}` already exists, pick another name",
                name
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddQueueUseCase {
    type Response = Queue;

    type Error = UseCaseError;

    const NAME: &'static str = "AddQueue";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let queue = Queue::create(&self.name, &self.queue_id).map_err(UseCaseError::InvalidQueue)?;

        let queues = ctx.repos.queues.find_all().await.map_err(|e| {
            error!("Unable to load queues. Err: {:?}", e);
            UseCaseError::StorageError
        })?;
        // Reminders are keyed by queue name
        if queues.iter().any(|q| q.name == queue.name) {
            return Err(UseCaseError::NameTaken(queue.name));
        }

        ctx.repos.queues.insert(&queue).await.map_err(|e| {
            error!("Unable to store queue {:?}. Err: {:?}", queue, e);
            UseCaseError::StorageError
        })?;

        Ok(queue)
    }
}
