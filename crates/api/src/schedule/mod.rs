mod deliver_due_reminders;
mod diff_schedule_snapshot;
mod get_queue_schedule;
mod refresh_queue_schedule;
pub mod sync_queue_reminders;

use actix_web::web;
use get_queue_schedule::get_queue_schedule_controller;
use refresh_queue_schedule::{refresh_queue_controller, refresh_queues_controller};

pub use deliver_due_reminders::DeliverDueRemindersUseCase;
pub use refresh_queue_schedule::{RefreshQueuesUseCase, RefreshTrigger};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/queues/refresh",
        web::post().to(refresh_queues_controller),
    );
    cfg.route(
        "/queues/{queue_id}/refresh",
        web::post().to(refresh_queue_controller),
    );
    cfg.route(
        "/queues/{queue_id}/schedule",
        web::get().to(get_queue_schedule_controller),
    );
}
