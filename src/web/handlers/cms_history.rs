use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db;
use crate::log_err;
use crate::models::HistoryContent;
use crate::web::forms::{AdminForm, HistoryForm, NoticeQuery};
use crate::web::helpers::{mutation_response, notice_from_query, render, require_admin, Swap};
use crate::web::state::AppState;
use crate::web::templates::CmsHistoryTemplate;

const HISTORY_PATH: &str = "/admin/cms/history";

#[get("/admin/cms/history")]
pub async fn history_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let history = match db::get_history_content(state.store.as_ref()).await {
        Ok(history) => history,
        Err(e) => {
            log_err!(state.store, ("get_history_content", e.to_string()));
            HistoryContent::default()
        }
    };

    render(CmsHistoryTemplate {
        tab: "history",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        history,
    })
}

#[post("/admin/cms/history")]
pub async fn history_save(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: AdminForm<HistoryForm>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::info!(error = %e, "unreadable history form");
            return mutation_response(&req, HISTORY_PATH, "history_failed", None, Swap::Nothing);
        }
    };

    match db::save_history_content(state.store.as_ref(), &form.to_history()).await {
        Ok(_) => mutation_response(&req, HISTORY_PATH, "history_saved", None, Swap::Nothing),
        Err(e) => {
            log_err!(state.store, ("save_history_content", e.to_string()));
            mutation_response(&req, HISTORY_PATH, "history_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(history_page).service(history_save);
}
