use crate::error::PowerScheduleError;
use crate::schedule::sync_queue_reminders::{SyncQueueRemindersTrigger, SyncQueueRemindersUseCase};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use power_schedule_api_structs::update_queue::*;
use power_schedule_domain::{Queue, QueueValidationError, ID};
use power_schedule_infra::PowerScheduleContext;
use tracing::{error, warn};

pub async fn update_queue_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PowerScheduleContext>,
) -> Result<HttpResponse, PowerScheduleError> {
    let body = body.0;
    let usecase = UpdateQueueUseCase {
        id: path.queue_id.clone(),
        name: body.name,
        queue_id: body.queue_id,
        notifications_enabled: body.notifications_enabled,
        auto_update_enabled: body.auto_update_enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.queue)))
        .map_err(PowerScheduleError::from)
}

#[derive(Debug)]
pub struct UpdateQueueUseCase {
    pub id: ID,
    pub name: Option<String>,
    pub queue_id: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub auto_update_enabled: Option<bool>,
}

#[derive(Debug)]
pub struct UpdatedQueue {
    pub previous: Queue,
    pub queue: Queue,
}

impl UpdatedQueue {
    /// Reminder keys embed the queue name, so a rename moves the namespace
    fn renamed(&self) -> bool {
        self.previous.name != self.queue.name
    }

    fn queue_id_changed(&self) -> bool {
        self.previous.queue_id != self.queue.queue_id
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidQueue(QueueValidationError),
    NameTaken(String),
    StorageError,
}

impl From<UseCaseError> for PowerScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The queue with id: {}, was not found.", id))
            }
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
impl UseCase for UpdateQueueUseCase {
    type Response = UpdatedQueue;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateQueue";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let previous = ctx
            .repos
            .queues
            .find(&self.id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.id.clone()))?;

        let mut queue = previous.clone();
        if let Some(name) = &self.name {
            queue.name = name.trim().to_string();
        }
        if let Some(queue_id) = &self.queue_id {
            queue.queue_id = queue_id.trim().to_string();
        }
        if let Some(enabled) = self.notifications_enabled {
            queue.notifications_enabled = enabled;
        }
        if let Some(enabled) = self.auto_update_enabled {
            queue.auto_update_enabled = enabled;
        }
        queue.validate().map_err(UseCaseError::InvalidQueue)?;

        if queue.name != previous.name {
            let queues = ctx.repos.queues.find_all().await.map_err(|e| {
                error!("Unable to load queues. Err: {:?}", e);
                UseCaseError::StorageError
            })?;
            if queues.iter().any(|q| q.id != queue.id && q.name == queue.name) {
                return Err(UseCaseError::NameTaken(queue.name));
            }
        }

        ctx.repos.queues.save(&queue).await.map_err(|e| {
            error!("Unable to save queue {:?}. Err: {:?}", queue, e);
            UseCaseError::StorageError
        })?;

        let updated = UpdatedQueue { previous, queue };
        if updated.queue_id_changed() {
            // Whatever was fetched belongs to the old queue id
            if let Err(e) = ctx.repos.snapshots.delete(&updated.queue.id).await {
                error!("Unable to delete schedule snapshot. Err: {:?}", e);
            }
            ctx.session.forget_queue(&updated.queue.id);
        }

        Ok(updated)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnQueueUpdated)]
    }
}

/// Cancels or re-creates the reminders of a `Queue` whose notification
/// toggle, name or queue id changed
pub struct SyncRemindersOnQueueUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateQueueUseCase> for SyncRemindersOnQueueUpdated {
    async fn notify(&self, updated: &UpdatedQueue, ctx: &PowerScheduleContext) {
        let UpdatedQueue { previous, queue } = updated;
        let moved = updated.renamed() || updated.queue_id_changed();

        if previous.notifications_enabled && (!queue.notifications_enabled || moved) {
            ctx.services
                .alerts
                .cancel_alerts_matching(&previous.name)
                .await;
        }

        if queue.notifications_enabled && (!previous.notifications_enabled || moved) {
            let usecase = SyncQueueRemindersUseCase {
                request: SyncQueueRemindersTrigger::NotificationsEnabled(queue),
            };
            if let Err(e) = execute(usecase, ctx).await {
                warn!(
                    "Unable to sync reminders of queue {}, retried on the next sync. Err: {:?}",
                    queue.name, e
                );
            }
        }
    }
}
