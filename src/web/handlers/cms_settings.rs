use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db;
use crate::log_err;
use crate::models::WebsiteSettings;
use crate::web::forms::{AdminForm, NoticeQuery, SettingsForm};
use crate::web::helpers::{
    mutation_response, notice_from_query, render, require_admin, see_other, Swap,
};
use crate::web::state::AppState;
use crate::web::templates::CmsSettingsTemplate;

const SETTINGS_PATH: &str = "/admin/cms/settings";

#[get("/admin/cms")]
pub async fn cms_home(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    see_other(SETTINGS_PATH)
}

#[get("/admin/cms/settings")]
pub async fn settings_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let settings = match db::get_website_settings(state.store.as_ref()).await {
        Ok(settings) => settings,
        Err(e) => {
            log_err!(state.store, ("get_website_settings", e.to_string()));
            WebsiteSettings::default()
        }
    };

    render(CmsSettingsTemplate {
        tab: "settings",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        settings,
    })
}

/// Overwrites the whole settings document.
#[post("/admin/cms/settings")]
pub async fn settings_save(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: AdminForm<SettingsForm>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::info!(error = %e, "unreadable settings form");
            return mutation_response(&req, SETTINGS_PATH, "settings_failed", None, Swap::Nothing);
        }
    };

    match db::save_website_settings(state.store.as_ref(), &form.to_settings()).await {
        Ok(_) => mutation_response(&req, SETTINGS_PATH, "settings_saved", None, Swap::Nothing),
        Err(e) => {
            log_err!(state.store, ("save_website_settings", e.to_string()));
            mutation_response(&req, SETTINGS_PATH, "settings_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(cms_home)
        .service(settings_page)
        .service(settings_save);
}
