use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

use crate::db::{self, DocumentId, Record, SESSION_LIFETIME_HOURS};
use crate::log_err;
use crate::models::{AdminSession, WebsiteSettings};
use crate::services;
use crate::web::notice::Notice;
use crate::web::state::AppState;
use crate::web::templates::{Chrome, MaintenanceTemplate, NoticeOobTemplate};

pub const SESSION_COOKIE: &str = "maagap_session";
pub const LOGIN_PATH: &str = "/admin/login";

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Full-page navigation that also works for htmx requests.
pub fn redirect(req: &HttpRequest, location: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", location))
            .finish()
    } else {
        see_other(location)
    }
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_status(StatusCode::OK, t)
}

pub fn render_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => template_error(e),
    }
}

/// Renders a fragment for an htmx swap.
pub fn render_fragment<T: Template>(t: T) -> Result<String, HttpResponse> {
    t.render().map_err(template_error)
}

/// Renders one fragment per row, concatenated, for replacing a whole list.
pub fn render_rows<T: Template>(rows: impl IntoIterator<Item = T>) -> Result<String, HttpResponse> {
    let mut html = String::new();
    for row in rows {
        html.push_str(&render_fragment(row)?);
    }
    Ok(html)
}

fn template_error(e: askama::Error) -> HttpResponse {
    tracing::error!(error = %e, "template rendering failed");
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Template error")
}

pub fn session_cookie(id: &DocumentId, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/admin")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(SESSION_LIFETIME_HOURS))
        .finish()
}

pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/admin")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

pub fn session_id(req: &HttpRequest) -> Option<DocumentId> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .map(DocumentId::from)
}

/// Resolves the admin session or produces the redirect to the login page.
pub async fn require_admin(
    state: &AppState,
    req: &HttpRequest,
) -> Result<Record<AdminSession>, HttpResponse> {
    let unauthorized = || {
        if is_htmx(req) {
            HttpResponse::Unauthorized()
                .insert_header(("HX-Redirect", LOGIN_PATH))
                .finish()
        } else {
            see_other(LOGIN_PATH)
        }
    };

    let Some(id) = session_id(req) else {
        return Err(unauthorized());
    };

    match services::resolve_session(state.store.as_ref(), &id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(unauthorized()),
        Err(e) => {
            log_err!(state.store, ("resolve_session", e.to_string()));
            Err(unauthorized())
        }
    }
}

/// Settings and navigation for public pages. Fetch failures fall back to
/// defaults and an empty navigation.
pub async fn load_chrome(state: &AppState) -> Chrome {
    let settings = match db::get_website_settings(state.store.as_ref()).await {
        Ok(settings) => settings,
        Err(e) => {
            log_err!(state.store, ("get_website_settings", e.to_string()));
            WebsiteSettings::default()
        }
    };

    let nav_pages = match db::list_nav_pages(state.store.as_ref()).await {
        Ok(pages) => pages,
        Err(e) => {
            log_err!(state.store, ("list_nav_pages", e.to_string()));
            Vec::new()
        }
    };

    Chrome {
        settings,
        nav_pages,
    }
}

/// The 503 page shown instead of public content while maintenance is on.
pub fn maintenance_guard(chrome: &Chrome) -> Option<HttpResponse> {
    if !chrome.settings.maintenance_mode {
        return None;
    }

    Some(render_status(
        StatusCode::SERVICE_UNAVAILABLE,
        MaintenanceTemplate {
            chrome: chrome.clone(),
        },
    ))
}

pub fn notice_location(back_to: &str, code: &str, detail: Option<&str>) -> String {
    let mut location = format!("{}?notice={}", back_to, code);
    if let Some(detail) = detail {
        location.push_str("&detail=");
        location.push_str(&urlencoding::encode(detail));
    }
    location
}

/// What an htmx request gets swapped into its target.
pub enum Swap {
    /// Replace the target with this HTML; empty removes it.
    Content(String),
    /// Leave the target untouched.
    Nothing,
}

/// Answers an admin mutation. htmx requests receive the fragment plus an
/// out-of-band notice; plain posts are redirected back to `back_to`.
pub fn mutation_response(
    req: &HttpRequest,
    back_to: &str,
    code: &str,
    detail: Option<&str>,
    swap: Swap,
) -> HttpResponse {
    if !is_htmx(req) {
        return see_other(&notice_location(back_to, code, detail));
    }

    let notice = match render_fragment(NoticeOobTemplate {
        notice: Notice::from_code(code, detail),
    }) {
        Ok(html) => html,
        Err(resp) => return resp,
    };

    match swap {
        Swap::Content(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html + &notice),
        Swap::Nothing => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .insert_header(("HX-Reswap", "none"))
            .body(notice),
    }
}

pub fn notice_from_query(notice: Option<&str>, detail: Option<&str>) -> Option<Notice> {
    notice.and_then(|code| Notice::from_code(code, detail))
}

/// Request context recorded with swallowed errors.
pub fn request_params(req: &HttpRequest) -> serde_json::Value {
    serde_json::json!({
        "method": req.method().as_str(),
        "path": req.path(),
        "query": req.query_string(),
    })
}
