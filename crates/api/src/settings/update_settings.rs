use crate::error::PowerScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::update_settings::*;
use power_schedule_domain::{reminder::MIN_MINUTES_BEFORE, Settings};
use power_schedule_infra::PowerScheduleContext;
use tracing::error;

pub async fn update_settings_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let usecase = UpdateSettingsUseCase {
        update_interval_minutes: body.update_interval_minutes,
        notification_minutes_before: body.notification_minutes_before,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(PowerScheduleError::from)
}

#[derive(Debug)]
pub struct UpdateSettingsUseCase {
    pub update_interval_minutes: Option<u32>,
    pub notification_minutes_before: Option<u32>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidUpdateInterval(u32),
    InvalidMinutesBefore(u32),
    StorageError,
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidUpdateInterval(minutes) => Self::BadClientData(format!(
                "Update interval must be a positive number of minutes, got: {}",
                minutes
            )),
            UseCaseError::InvalidMinutesBefore(minutes) => Self::BadClientData(format!(
                "Reminders need at least {} minutes lead time, got: {}",
                MIN_MINUTES_BEFORE, minutes
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSettingsUseCase {
    type Response = Settings;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSettings";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let mut settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(minutes) = self.update_interval_minutes {
            if minutes == 0 {
                return Err(UseCaseError::InvalidUpdateInterval(minutes));
            }
            settings.update_interval_minutes = minutes;
        }
        if let Some(minutes) = self.notification_minutes_before {
            if minutes < MIN_MINUTES_BEFORE {
                return Err(UseCaseError::InvalidMinutesBefore(minutes));
            }
            settings.notification_minutes_before = minutes;
        }

        ctx.repos.settings.save(&settings).await.map_err(|e| {
            error!("Unable to save settings {:?}. Err: {:?}", settings, e);
            UseCaseError::StorageError
        })?;

        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use power_schedule_domain::{DEFAULT_NOTIFICATION_MINUTES_BEFORE, DEFAULT_UPDATE_INTERVAL_MINUTES};

    #[actix_web::main]
    #[test]
    async fn it_updates_given_fields_only() {
        let ctx = PowerScheduleContext::create_inmemory();
        let mut usecase = UpdateSettingsUseCase {
            update_interval_minutes: Some(60),
            notification_minutes_before: None,
        };
        let settings = usecase.execute(&ctx).await.unwrap();
        assert_eq!(settings.update_interval_minutes, 60);
        assert_eq!(
            settings.notification_minutes_before,
            DEFAULT_NOTIFICATION_MINUTES_BEFORE
        );
        assert_eq!(ctx.repos.settings.get().await.unwrap(), settings);
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_too_short_lead_time() {
        let ctx = PowerScheduleContext::create_inmemory();
        let mut usecase = UpdateSettingsUseCase {
            update_interval_minutes: None,
            notification_minutes_before: Some(0),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMinutesBefore(0))
        ));
        let settings = ctx.repos.settings.get().await.unwrap();
        assert_eq!(settings.update_interval_minutes, DEFAULT_UPDATE_INTERVAL_MINUTES);
    }
}
