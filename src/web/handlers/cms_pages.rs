use actix_web::{get, post, web, HttpRequest, Responder};

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::services;
use crate::web::forms::{AdminForm, NoticeQuery, PageForm};
use crate::web::helpers::{
    mutation_response, notice_from_query, notice_location, redirect, render, render_rows,
    require_admin, Swap,
};
use crate::web::notice::DUPLICATE_SLUG;
use crate::web::state::AppState;
use crate::web::templates::{CmsPagesTemplate, PageRow, PageRowTemplate};

const PAGES_PATH: &str = "/admin/cms/pages";

#[get("/admin/cms/pages")]
pub async fn pages_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let pages = match db::list_custom_pages(state.store.as_ref()).await {
        Ok(pages) => pages,
        Err(e) => {
            log_err!(state.store, ("list_custom_pages", e.to_string()));
            Vec::new()
        }
    };

    let duplicates = services::duplicate_slugs(&pages);
    let rows = pages
        .into_iter()
        .map(|page| PageRow {
            duplicate: duplicates.contains(&page.slug),
            page,
        })
        .collect();

    render(CmsPagesTemplate {
        tab: "pages",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        rows,
    })
}

/// Adds a page. A slug already in use is accepted with a warning.
#[post("/admin/cms/pages")]
pub async fn page_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: AdminForm<PageForm>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::info!(error = %e, "unreadable page form");
            return mutation_response(&req, PAGES_PATH, "page_add_failed", None, Swap::Nothing);
        }
    };

    let create = match form.to_create() {
        Ok(create) => create,
        Err(e) => {
            tracing::info!(error = %e, "rejected page");
            return mutation_response(&req, PAGES_PATH, "page_add_failed", None, Swap::Nothing);
        }
    };

    let store = state.store.as_ref();
    let page = match db::create_custom_page(store, &create).await {
        Ok(page) => page,
        Err(e) => {
            log_err!(state.store, ("create_custom_page", e.to_string()));
            return mutation_response(&req, PAGES_PATH, "page_add_failed", None, Swap::Nothing);
        }
    };

    // The whole list is re-rendered so the new page lands at its `order`.
    let pages = match db::list_custom_pages(store).await {
        Ok(pages) => pages,
        Err(e) => {
            log_err!(state.store, ("list_custom_pages", e.to_string()));
            return redirect(&req, &notice_location(PAGES_PATH, "page_added", None));
        }
    };

    let duplicates = services::duplicate_slugs(&pages);
    let (code, detail) = if duplicates.contains(&page.slug) {
        tracing::warn!(slug = %page.slug, "custom page slug is already in use");
        (DUPLICATE_SLUG, Some(page.slug.as_str()))
    } else {
        ("page_added", None)
    };

    let rows = render_rows(pages.into_iter().map(|page| PageRowTemplate {
        row: PageRow {
            duplicate: duplicates.contains(&page.slug),
            page,
        },
    }));

    match rows {
        Ok(rows) => mutation_response(&req, PAGES_PATH, code, detail, Swap::Content(rows)),
        Err(resp) => resp,
    }
}

#[post("/admin/cms/pages/{id}/delete")]
pub async fn page_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_custom_page(state.store.as_ref(), &id).await {
        Ok(_) => mutation_response(
            &req,
            PAGES_PATH,
            "page_deleted",
            None,
            Swap::Content(String::new()),
        ),
        Err(e) => {
            log_err!(state.store, ("delete_custom_page", id.as_str(), e.to_string()));
            mutation_response(&req, PAGES_PATH, "page_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages_page)
        .service(page_create)
        .service(page_delete);
}
