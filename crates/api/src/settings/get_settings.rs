use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::get_settings::*;
use power_schedule_domain::Settings;
use power_schedule_infra::PowerScheduleContext;

pub async fn get_settings_controller(
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    execute(GetSettingsUseCase {}, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(PowerScheduleError::from)
}

#[derive(Debug)]
pub struct GetSettingsUseCase {}

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
impl UseCase for GetSettingsUseCase {
    type Response = Settings;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSettings";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
