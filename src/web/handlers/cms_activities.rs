use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::services;
use crate::web::forms::{activity_from_multipart, NoticeQuery};
use crate::web::helpers::{
    mutation_response, notice_from_query, notice_location, redirect, render, render_rows,
    require_admin, Swap,
};
use crate::web::multipart::MultipartData;
use crate::web::state::AppState;
use crate::web::templates::{ActivityRowTemplate, CmsActivitiesTemplate};

const ACTIVITIES_PATH: &str = "/admin/cms/activities";

#[get("/admin/cms/activities")]
pub async fn activities_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let activities = match db::list_activities(state.store.as_ref()).await {
        Ok(activities) => activities,
        Err(e) => {
            log_err!(state.store, ("list_activities", e.to_string()));
            Vec::new()
        }
    };

    render(CmsActivitiesTemplate {
        tab: "activities",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        activities,
    })
}

/// Uploads every attached file, then writes the activity.
#[post("/admin/cms/activities")]
pub async fn activity_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let failed =
        || mutation_response(&req, ACTIVITIES_PATH, "activity_add_failed", None, Swap::Nothing);

    let data = match MultipartData::read(payload, state.options.max_upload_bytes).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable activity upload");
            return failed();
        }
    };

    // Check the text fields before anything is uploaded.
    if let Err(e) = activity_from_multipart(&data, Default::default()) {
        tracing::info!(error = %e, "rejected activity");
        return failed();
    }

    let files = data.files("media");
    let media = match services::upload_activity_media(state.objects.as_ref(), &files).await {
        Ok(media) => media,
        Err(e) => {
            log_err!(state.store, ("upload_activity_media", files.len(), e.to_string()));
            return failed();
        }
    };

    let create = match activity_from_multipart(&data, media) {
        Ok(create) => create,
        Err(_) => return failed(),
    };

    let store = state.store.as_ref();
    if let Err(e) = db::create_activity(store, &create).await {
        log_err!(state.store, ("create_activity", e.to_string()));
        return failed();
    }

    // Activities are listed by their date, so the list is re-rendered whole.
    let activities = match db::list_activities(store).await {
        Ok(activities) => activities,
        Err(e) => {
            log_err!(state.store, ("list_activities", e.to_string()));
            return redirect(&req, &notice_location(ACTIVITIES_PATH, "activity_added", None));
        }
    };

    match render_rows(activities.into_iter().map(|activity| ActivityRowTemplate { activity })) {
        Ok(rows) => mutation_response(
            &req,
            ACTIVITIES_PATH,
            "activity_added",
            None,
            Swap::Content(rows),
        ),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/activities/{id}/delete")]
pub async fn activity_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_activity(state.store.as_ref(), &id).await {
        Ok(_) => mutation_response(
            &req,
            ACTIVITIES_PATH,
            "activity_deleted",
            None,
            Swap::Content(String::new()),
        ),
        Err(e) => {
            log_err!(state.store, ("delete_activity", id.as_str(), e.to_string()));
            mutation_response(&req, ACTIVITIES_PATH, "activity_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(activities_page)
        .service(activity_create)
        .service(activity_delete);
}
