use actix_web::{get, post, web, HttpRequest, Responder};
use chrono::Utc;

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::models::{FinancialSummary, CURRENCY};
use crate::services;
use crate::web::forms::{AdminForm, FinancialForm, NoticeQuery};
use crate::web::helpers::{
    mutation_response, notice_from_query, notice_location, redirect, render, render_fragment,
    render_rows, require_admin, Swap,
};
use crate::web::state::AppState;
use crate::web::templates::{AdminFinancialTemplate, FinancialRowTemplate, FinancialSummaryTemplate};

const FINANCIAL_PATH: &str = "/admin/financial";

async fn current_summary(state: &AppState) -> Option<FinancialSummary> {
    match db::list_financial_records(state.store.as_ref()).await {
        Ok(records) => Some(services::summarize(records.iter().map(|r| &r.data))),
        Err(e) => {
            log_err!(state.store, ("list_financial_records", e.to_string()));
            None
        }
    }
}

/// The totals box, swapped out-of-band after a change.
async fn summary_fragment(state: &AppState) -> String {
    let Some(summary) = current_summary(state).await else {
        return String::new();
    };

    render_fragment(FinancialSummaryTemplate {
        summary,
        currency: CURRENCY,
        oob: true,
    })
    .unwrap_or_default()
}

#[get("/admin/financial")]
pub async fn financial_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let records = match db::list_financial_records(state.store.as_ref()).await {
        Ok(records) => records,
        Err(e) => {
            log_err!(state.store, ("list_financial_records", e.to_string()));
            Vec::new()
        }
    };
    let summary = services::summarize(records.iter().map(|r| &r.data));

    render(AdminFinancialTemplate {
        tab: "financial",
        notice: notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        records,
        summary,
        currency: CURRENCY,
        today: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
    })
}

#[post("/admin/financial")]
pub async fn financial_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: AdminForm<FinancialForm>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::info!(error = %e, "unreadable transaction form");
            return mutation_response(&req, FINANCIAL_PATH, "transaction_add_failed", None, Swap::Nothing);
        }
    };

    let data = match form.to_create() {
        Ok(data) => data,
        Err(e) => {
            tracing::info!(error = %e, "rejected transaction");
            return mutation_response(&req, FINANCIAL_PATH, "transaction_add_failed", None, Swap::Nothing);
        }
    };

    let store = state.store.as_ref();
    if let Err(e) = db::create_financial_record(store, &data).await {
        log_err!(state.store, ("create_financial_record", e.to_string()));
        return mutation_response(&req, FINANCIAL_PATH, "transaction_add_failed", None, Swap::Nothing);
    }

    // Records are listed by date, so the whole table body is replaced.
    let records = match db::list_financial_records(store).await {
        Ok(records) => records,
        Err(e) => {
            log_err!(state.store, ("list_financial_records", e.to_string()));
            return redirect(&req, &notice_location(FINANCIAL_PATH, "transaction_added", None));
        }
    };

    let summary = FinancialSummaryTemplate {
        summary: services::summarize(records.iter().map(|r| &r.data)),
        currency: CURRENCY,
        oob: true,
    };
    let summary = match render_fragment(summary) {
        Ok(html) => html,
        Err(resp) => return resp,
    };

    match render_rows(records.into_iter().map(|record| FinancialRowTemplate { record })) {
        Ok(rows) => mutation_response(
            &req,
            FINANCIAL_PATH,
            "transaction_added",
            None,
            Swap::Content(rows + &summary),
        ),
        Err(resp) => resp,
    }
}

#[post("/admin/financial/{id}/delete")]
pub async fn financial_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_financial_record(state.store.as_ref(), &id).await {
        Ok(_) => {
            let summary = summary_fragment(&state).await;
            mutation_response(
                &req,
                FINANCIAL_PATH,
                "transaction_deleted",
                None,
                Swap::Content(summary),
            )
        }
        Err(e) => {
            log_err!(state.store, ("delete_financial_record", id.as_str(), e.to_string()));
            mutation_response(&req, FINANCIAL_PATH, "transaction_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(financial_list)
        .service(financial_create)
        .service(financial_delete);
}
