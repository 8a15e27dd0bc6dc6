use actix_web::web;

mod add_queue;
mod delete_queue;
mod get_queues;
mod update_queue;

use add_queue::add_queue_controller;
use delete_queue::delete_queue_controller;
use get_queues::get_queues_controller;
use update_queue::update_queue_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/queues", web::get().to(get_queues_controller));
    cfg.route("/queues", web::post().to(add_queue_controller));
    cfg.route(
        "/queues/{queue_id}",
        web::put().to(update_queue_controller),
    );
    cfg.route(
        "/queues/{queue_id}",
        web::delete().to(delete_queue_controller),
    );
}
