use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use crate::db::{self, DocumentId};
use crate::log_err;
use crate::models::{MemberStatus, MemberType};
use crate::services::{self, MemberFilter};
use crate::web::forms::{MembersQuery, NoticeQuery};
use crate::web::helpers::{
    mutation_response, notice_from_query, render, render_fragment, require_admin, see_other,
    Swap,
};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminMemberDetailTemplate, AdminMembersTemplate, MemberRow, MemberRowTemplate,
};

const MEMBERS_PATH: &str = "/admin/members";

#[get("/admin")]
pub async fn admin_home(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    see_other(MEMBERS_PATH)
}

#[get("/admin/members")]
pub async fn members_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<MembersQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let members = match db::list_members(state.store.as_ref()).await {
        Ok(members) => members,
        Err(e) => {
            log_err!(state.store, ("list_members", e.to_string()));
            Vec::new()
        }
    };

    let filter = MemberFilter::from_params(
        query.q.as_deref(),
        query.member_type.as_deref(),
        query.status.as_deref(),
    );
    let duplicates = services::duplicate_emails(&members);
    let total = members.len();

    let rows = members
        .into_iter()
        .filter(|m| filter.matches(m))
        .map(|member| MemberRow {
            duplicate: services::is_duplicate(&duplicates, &member),
            member,
        })
        .collect();

    render(AdminMembersTemplate {
        tab: "members",
        notice: notice_from_query(query.notice.as_deref(), None),
        rows,
        total,
        q: filter.search.clone(),
        member_type: filter
            .member_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "All".to_string()),
        status: filter
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "All".to_string()),
        types: MemberType::ALL,
        statuses: MemberStatus::ALL,
    })
}

#[get("/admin/members/{id}")]
pub async fn member_detail(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::get_member(state.store.as_ref(), &id).await {
        Ok(Some(member)) => render(AdminMemberDetailTemplate::new(
            member,
            notice_from_query(query.notice.as_deref(), query.detail.as_deref()),
        )),
        Ok(None) => HttpResponse::NotFound().body("Member not found"),
        Err(e) => {
            log_err!(state.store, ("get_member", id.as_str(), e.to_string()));
            HttpResponse::InternalServerError().body("Failed to load member")
        }
    }
}

/// Flips Active/Inactive. htmx callers get the re-rendered row.
#[post("/admin/members/{id}/status")]
pub async fn member_toggle_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    let store = state.store.as_ref();

    let member = match db::toggle_member_status(store, &id).await {
        Ok(Some(member)) => member,
        Ok(None) => {
            return mutation_response(&req, MEMBERS_PATH, "member_update_failed", None, Swap::Nothing)
        }
        Err(e) => {
            log_err!(state.store, ("toggle_member_status", id.as_str(), e.to_string()));
            return mutation_response(&req, MEMBERS_PATH, "member_update_failed", None, Swap::Nothing);
        }
    };

    // Re-list so the duplicate flag stays accurate.
    let duplicate = match db::list_members(store).await {
        Ok(all) => services::is_duplicate(&services::duplicate_emails(&all), &member),
        Err(_) => false,
    };

    let row = match render_fragment(MemberRowTemplate {
        row: MemberRow { member, duplicate },
    }) {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    mutation_response(&req, MEMBERS_PATH, "member_updated", None, Swap::Content(row))
}

#[post("/admin/members/{id}/delete")]
pub async fn member_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req).await {
        return resp;
    }

    let id = DocumentId::from(path.into_inner());
    match db::delete_member(state.store.as_ref(), &id).await {
        Ok(_) => mutation_response(
            &req,
            MEMBERS_PATH,
            "member_deleted",
            None,
            Swap::Content(String::new()),
        ),
        Err(e) => {
            log_err!(state.store, ("delete_member", id.as_str(), e.to_string()));
            mutation_response(&req, MEMBERS_PATH, "member_delete_failed", None, Swap::Nothing)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_home)
        .service(members_list)
        .service(member_detail)
        .service(member_toggle_status)
        .service(member_delete);
}
