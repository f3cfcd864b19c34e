pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod multipart;
pub mod notice;
pub mod security;
pub mod state;
pub mod templates;

use actix_web::web;

use crate::config::WebOptions;

pub use state::AppState;

/// Registers every route, public and admin, with the custom page route last.
/// Urlencoded bodies share the multipart size limit so long page content and
/// history sections are accepted.
pub fn configure(options: WebOptions) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::FormConfig::default().limit(options.max_upload_bytes));
        handlers::configure(cfg);
        handlers::configure_catch_all(cfg);
    }
}
