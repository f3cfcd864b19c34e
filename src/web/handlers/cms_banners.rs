use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::services;
use crate::web::forms::{banner_from_multipart, NoticeQuery};
use crate::web::helpers::{
    mutation_response, notice_from_query, render, render_fragment, require_admin, Swap,
};
use crate::web::multipart::MultipartData;
use crate::web::state::AppState;
use crate::web::templates::{BannerRowTemplate, CmsBannersTemplate};

const BANNERS_PATH: &str = "/admin/cms/banners";

#[get("/admin/cms/banners")]
pub async fn banners_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let banners = match db::list_banners(state.store.as_ref()).await {
        Ok(banners) => banners,
        Err(e) => {
            log_err!(state.store, ("list_banners", e.to_string()));
            Vec::new()
        }
    };

    render(CmsBannersTemplate {
        tab: "banners",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        banners,
    })
}

/// Uploads the optional image first, then writes the banner. A failed write
/// leaves the uploaded image in storage.
#[post("/admin/cms/banners")]
pub async fn banner_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let failed = || mutation_response(&req, BANNERS_PATH, "banner_add_failed", None, Swap::Nothing);

    let data = match MultipartData::read(payload, state.options.max_upload_bytes).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable banner upload");
            return failed();
        }
    };

    let image_url = match data.file("image") {
        Some(file) => match services::upload_banner_image(state.objects.as_ref(), file).await {
            Ok(url) => url,
            Err(e) => {
                log_err!(state.store, ("upload_banner_image", file.file_name.as_str(), e.to_string()));
                return failed();
            }
        },
        None => data.text("image_url").to_string(),
    };

    let create = match banner_from_multipart(&data, image_url) {
        Ok(create) => create,
        Err(e) => {
            tracing::info!(error = %e, "rejected banner");
            return failed();
        }
    };

    let banner = match db::create_banner(state.store.as_ref(), &create).await {
        Ok(banner) => banner,
        Err(e) => {
            log_err!(state.store, ("create_banner", e.to_string()));
            return failed();
        }
    };

    match render_fragment(BannerRowTemplate { banner }) {
        Ok(row) => mutation_response(&req, BANNERS_PATH, "banner_added", None, Swap::Content(row)),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/banners/{id}/toggle")]
pub async fn banner_toggle(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    let banner = match db::toggle_banner(state.store.as_ref(), &id).await {
        Ok(Some(banner)) => banner,
        Ok(None) => {
            return mutation_response(&req, BANNERS_PATH, "banner_update_failed", None, Swap::Nothing)
        }
        Err(e) => {
            log_err!(state.store, ("toggle_banner", id.as_str(), e.to_string()));
            return mutation_response(&req, BANNERS_PATH, "banner_update_failed", None, Swap::Nothing);
        }
    };

    match render_fragment(BannerRowTemplate { banner }) {
        Ok(row) => mutation_response(&req, BANNERS_PATH, "banner_updated", None, Swap::Content(row)),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/banners/{id}/delete")]
pub async fn banner_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_banner(state.store.as_ref(), &id).await {
        Ok(_) => mutation_response(
            &req,
            BANNERS_PATH,
            "banner_deleted",
            None,
            Swap::Content(String::new()),
        ),
        Err(e) => {
            log_err!(state.store, ("delete_banner", id.as_str(), e.to_string()));
            mutation_response(&req, BANNERS_PATH, "banner_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(banners_page)
        .service(banner_create)
        .service(banner_toggle)
        .service(banner_delete);
}
