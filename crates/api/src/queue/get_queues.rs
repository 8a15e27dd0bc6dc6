use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::get_queues::*;
use power_schedule_domain::Queue;
use power_schedule_infra::PowerScheduleContext;

pub async fn get_queues_controller(
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    execute(GetQueuesUseCase {}, &ctx)
        .await
        .map(|queues| HttpResponse::Ok().json(APIResponse::new(queues)))
        .map_err(PowerScheduleError::from)
}

#[derive(Debug)]
pub struct GetQueuesUseCase {}

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

#[async_trait::async_trait(?Send)]
impl UseCase for GetQueuesUseCase {
    type Response = Vec<Queue>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetQueues";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .queues
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
