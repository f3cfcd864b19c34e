pub mod admin_financial;
pub mod admin_members;
pub mod auth;
pub mod cms_activities;
pub mod cms_banners;
pub mod cms_history;
pub mod cms_pages;
pub mod cms_promotions;
pub mod cms_settings;
pub mod public;
pub mod register;

use actix_web::web;

/// Configure all routes EXCEPT the custom page route.
/// `/{slug}` must be registered last so it never shadows a fixed path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    register::configure(cfg);
    auth::configure(cfg);
    admin_members::configure(cfg);
    admin_financial::configure(cfg);
    cms_settings::configure(cfg);
    cms_banners::configure(cfg);
    cms_pages::configure(cfg);
    cms_activities::configure(cfg);
    cms_promotions::configure(cfg);
    cms_history::configure(cfg);
}

/// Configure the custom page route. This MUST be called last.
pub fn configure_catch_all(cfg: &mut web::ServiceConfig) {
    cfg.service(public::custom_page);
}
