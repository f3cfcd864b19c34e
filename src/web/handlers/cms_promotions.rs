use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::web::forms::{AdminForm, NoticeQuery, PromotionForm};
use crate::web::helpers::{
    mutation_response, notice_from_query, render, render_fragment, require_admin, Swap,
};
use crate::web::state::AppState;
use crate::web::templates::{CmsPromotionsTemplate, PromotionRowTemplate};

const PROMOTIONS_PATH: &str = "/admin/cms/promotions";

#[get("/admin/cms/promotions")]
pub async fn promotions_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let promotions = match db::list_promotions(state.store.as_ref()).await {
        Ok(promotions) => promotions,
        Err(e) => {
            log_err!(state.store, ("list_promotions", e.to_string()));
            Vec::new()
        }
    };

    render(CmsPromotionsTemplate {
        tab: "promotions",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        promotions,
    })
}

#[post("/admin/cms/promotions")]
pub async fn promotion_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: AdminForm<PromotionForm>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::info!(error = %e, "unreadable promotion form");
            return mutation_response(&req, PROMOTIONS_PATH, "promotion_add_failed", None, Swap::Nothing);
        }
    };

    let create = match form.to_create() {
        Ok(create) => create,
        Err(e) => {
            tracing::info!(error = %e, "rejected promotion");
            return mutation_response(&req, PROMOTIONS_PATH, "promotion_add_failed", None, Swap::Nothing);
        }
    };

    let promotion = match db::create_promotion(state.store.as_ref(), &create).await {
        Ok(promotion) => promotion,
        Err(e) => {
            log_err!(state.store, ("create_promotion", e.to_string()));
            return mutation_response(&req, PROMOTIONS_PATH, "promotion_add_failed", None, Swap::Nothing);
        }
    };

    match render_fragment(PromotionRowTemplate { promotion }) {
        Ok(row) => mutation_response(
            &req,
            PROMOTIONS_PATH,
            "promotion_added",
            None,
            Swap::Content(row),
        ),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/promotions/{id}/toggle")]
pub async fn promotion_toggle(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    let promotion = match db::toggle_promotion(state.store.as_ref(), &id).await {
        Ok(Some(promotion)) => promotion,
        Ok(None) => {
            return mutation_response(&req, PROMOTIONS_PATH, "promotion_update_failed", None, Swap::Nothing)
        }
        Err(e) => {
            log_err!(state.store, ("toggle_promotion", id.as_str(), e.to_string()));
            return mutation_response(&req, PROMOTIONS_PATH, "promotion_update_failed", None, Swap::Nothing);
        }
    };

    match render_fragment(PromotionRowTemplate { promotion }) {
        Ok(row) => mutation_response(
            &req,
            PROMOTIONS_PATH,
            "promotion_updated",
            None,
            Swap::Content(row),
        ),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/promotions/{id}/delete")]
pub async fn promotion_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_promotion(state.store.as_ref(), &id).await {
        Ok(_) => mutation_response(
            &req,
            PROMOTIONS_PATH,
            "promotion_deleted",
            None,
            Swap::Content(String::new()),
        ),
        Err(e) => {
            log_err!(state.store, ("delete_promotion", id.as_str(), e.to_string()));
            mutation_response(&req, PROMOTIONS_PATH, "promotion_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(promotions_page)
        .service(promotion_create)
        .service(promotion_toggle)
        .service(promotion_delete);
}
