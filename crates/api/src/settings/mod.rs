use actix_web::web;

mod get_settings;
mod update_settings;

use get_settings::get_settings_controller;
pub use get_settings::GetSettingsUseCase;
use update_settings::update_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/settings", web::get().to(get_settings_controller));
    cfg.route("/settings", web::put().to(update_settings_controller));
}
