mod detect_platform;
mod get_platforms;
mod preview_message;
mod test_connection;

use actix_web::web;
use detect_platform::detect_platform_controller;
use get_platforms::get_platforms_controller;
use preview_message::preview_message_controller;
use test_connection::test_connection_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/platform", web::get().to(get_platforms_controller));
    cfg.route(
        "/platform/detect",
        web::post().to(detect_platform_controller),
    );
    cfg.route("/platform/test", web::post().to(test_connection_controller));
    cfg.route(
        "/platform/preview",
        web::post().to(preview_message_controller),
    );
}
