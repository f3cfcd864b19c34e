use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use crate::log_err;
use crate::services;
use crate::web::forms::{AuthQuery, LoginForm};
use crate::web::helpers::{
    is_htmx, removal_cookie, render, render_status, see_other, session_cookie, session_id,
    LOGIN_PATH,
};
use crate::web::security::RateLimit;
use crate::web::state::AppState;
use crate::web::templates::AdminLoginTemplate;

#[get("/admin/login")]
pub async fn login_form(query: web::Query<AuthQuery>) -> impl Responder {
    render(AdminLoginTemplate {
        error: query.error.as_deref().map(login_error),
    })
}

fn login_error(code: &str) -> String {
    match code {
        "missing" => "Email and password are required",
        "invalid" => "Invalid email or password",
        "rate_limit" => "Too many login attempts. Please try again later.",
        _ => "An internal error occurred. Please try again.",
    }
    .to_string()
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    if !state.rate_limiter.allow(&req, RateLimit::LOGIN) {
        return render_status(
            StatusCode::TOO_MANY_REQUESTS,
            AdminLoginTemplate {
                error: Some(login_error("rate_limit")),
            },
        );
    }

    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return see_other("/admin/login?error=missing");
    }

    let store = state.store.as_ref();

    let admin = match services::authenticate(store, email, &form.password).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            tracing::info!(%email, "failed admin login");
            return see_other("/admin/login?error=invalid");
        }
        Err(e) => {
            log_err!(state.store, ("authenticate", email, e.to_string()));
            return see_other("/admin/login?error=internal");
        }
    };

    let session = match services::start_session(store, &admin.id).await {
        Ok(session) => session,
        Err(e) => {
            log_err!(state.store, ("start_session", admin.id.as_str(), e.to_string()));
            return see_other("/admin/login?error=internal");
        }
    };

    tracing::info!(admin = %admin.id, "admin signed in");

    HttpResponse::SeeOther()
        .cookie(session_cookie(&session.id, state.options.secure_cookies))
        .insert_header(("Location", "/admin"))
        .finish()
}

#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(id) = session_id(&req) {
        if let Err(e) = services::end_session(state.store.as_ref(), &id).await {
            log_err!(state.store, ("end_session", id.as_str(), e.to_string()));
        }
    }

    let cookie = removal_cookie(state.options.secure_cookies);

    if is_htmx(&req) {
        HttpResponse::Ok()
            .cookie(cookie)
            .insert_header(("HX-Redirect", LOGIN_PATH))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header(("Location", LOGIN_PATH))
            .finish()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(logout);
}
