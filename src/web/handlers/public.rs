use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;

use crate::db;
use crate::log_err;
use crate::web::helpers::{load_chrome, maintenance_guard, render, render_status, request_params};
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, Chrome, CustomPageTemplate, GalleryTemplate, HistoryTemplate, HomeTemplate,
    MembersTemplate, NotFoundTemplate, PrayerTemplate,
};

const LATEST_ACTIVITIES: usize = 3;

/// Public pages swallow fetch failures: they are logged and the page renders
/// its empty state.
macro_rules! fetch_or_default {
    ($state:expr, $req:expr, $fetch:expr) => {
        match $fetch.await {
            Ok(value) => value,
            Err(e) => {
                log_err!($state.store, (request_params($req), e.to_string()));
                Default::default()
            }
        }
    };
}

#[get("/")]
pub async fn home(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    let store = state.store.as_ref();

    let banners = if chrome.settings.show_banner {
        fetch_or_default!(state, &req, db::list_active_banners(store))
    } else {
        Vec::new()
    };

    let today = Utc::now().date_naive();
    let promotions: Vec<_> = fetch_or_default!(state, &req, db::list_active_promotions(store));
    let promotions = promotions
        .into_iter()
        .filter(|p| p.is_current(today))
        .collect();

    let mut activities: Vec<_> = fetch_or_default!(state, &req, db::list_activities(store));
    activities.truncate(LATEST_ACTIVITIES);

    render(HomeTemplate {
        chrome,
        banners,
        promotions,
        activities,
    })
}

#[get("/about")]
pub async fn about(state: web::Data<AppState>) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    render(AboutTemplate { chrome })
}

#[get("/gallery")]
pub async fn gallery(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    let images = fetch_or_default!(state, &req, db::list_gallery_images(state.store.as_ref()));

    render(GalleryTemplate { chrome, images })
}

#[get("/members")]
pub async fn members(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    let members = fetch_or_default!(state, &req, db::list_active_members(state.store.as_ref()));

    render(MembersTemplate { chrome, members })
}

#[get("/history-mkd")]
pub async fn history(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    let history = fetch_or_default!(state, &req, db::get_history_content(state.store.as_ref()));

    render(HistoryTemplate { chrome, history })
}

#[get("/maagap-prayer")]
pub async fn prayer(state: web::Data<AppState>) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    render(PrayerTemplate { chrome })
}

/// Custom pages by slug. Registered last so fixed routes win.
#[get("/{slug}")]
pub async fn custom_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let chrome = load_chrome(&state).await;
    if let Some(resp) = maintenance_guard(&chrome) {
        return resp;
    }

    let slug = path.into_inner();
    let page = fetch_or_default!(state, &req, db::get_page_by_slug(state.store.as_ref(), &slug));

    match page {
        Some(page) => render(CustomPageTemplate { chrome, page }),
        None => not_found_page(chrome),
    }
}

fn not_found_page(chrome: Chrome) -> HttpResponse {
    render_status(StatusCode::NOT_FOUND, NotFoundTemplate { chrome })
}

/// Fallback for paths no route claims, such as nested unknown paths.
pub async fn not_found(state: web::Data<AppState>) -> HttpResponse {
    not_found_page(load_chrome(&state).await)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(about)
        .service(gallery)
        .service(members)
        .service(history)
        .service(prayer);
}
