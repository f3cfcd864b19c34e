use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;

use crate::log_err;
use crate::models::{Member, MemberType};
use crate::services::{self, Registration};
use crate::web::forms::{registration_from_multipart, RegisterQuery};
use crate::web::helpers::{load_chrome, render, render_status, see_other};
use crate::web::multipart::MultipartData;
use crate::web::security::RateLimit;
use crate::web::state::AppState;
use crate::web::templates::{Chrome, RegisterChooseTemplate, RegisterFormTemplate};

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const RATE_LIMITED: &str = "Too many registration attempts. Please try again later.";

fn form_page(chrome: Chrome, member: Member, status: StatusCode, error: &str) -> HttpResponse {
    render_status(
        status,
        RegisterFormTemplate {
            chrome,
            member,
            error: Some(error.to_string()),
        },
    )
}

/// Category selection, or the form once a known category is chosen.
#[get("/register")]
pub async fn register_page(
    state: web::Data<AppState>,
    query: web::Query<RegisterQuery>,
) -> impl Responder {
    let chrome = load_chrome(&state).await;

    let member_type = query
        .member_type
        .as_deref()
        .and_then(|t| t.parse::<MemberType>().ok());

    match member_type {
        Some(member_type) => render(RegisterFormTemplate {
            chrome,
            member: Member {
                member_type,
                ..Member::default()
            },
            error: None,
        }),
        None => render(RegisterChooseTemplate {
            chrome,
            types: MemberType::ALL,
            success: query.done.is_some(),
        }),
    }
}

#[post("/register")]
pub async fn register_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    let chrome = load_chrome(&state).await;

    if !state.rate_limiter.allow(&req, RateLimit::REGISTRATION) {
        return form_page(chrome, Member::default(), StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED);
    }

    let data = match MultipartData::read(payload, state.options.max_upload_bytes).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable registration body");
            return form_page(chrome, Member::default(), StatusCode::BAD_REQUEST, REGISTRATION_FAILED);
        }
    };

    let registration = match registration_from_multipart(&data) {
        Ok(registration) => registration,
        Err(e) => {
            tracing::info!(error = %e, "rejected registration");
            return form_page(chrome, Member::default(), StatusCode::BAD_REQUEST, REGISTRATION_FAILED);
        }
    };

    if let Err(e) = services::check_required(&registration.member) {
        tracing::info!(error = %e, "incomplete registration");
        let Registration { member, .. } = registration;
        return form_page(chrome, member, StatusCode::BAD_REQUEST, REGISTRATION_FAILED);
    }

    let member = registration.member.clone();
    match services::register_member(
        state.store.as_ref(),
        state.objects.as_ref(),
        registration,
        Utc::now(),
    )
    .await
    {
        Ok(record) => {
            tracing::info!(id = %record.id, member_type = %record.member_type, "member registered");
            see_other("/register?done=1")
        }
        Err(e) => {
            log_err!(state.store, ("register_member", member.email.clone(), e.to_string()));
            form_page(chrome, member, StatusCode::INTERNAL_SERVER_ERROR, REGISTRATION_FAILED)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_page).service(register_submit);
}
