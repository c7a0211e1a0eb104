//! HTTP route handlers
//!
//! Pages answer JSON views (rendered rich text included as descriptors and
//! HTML fragments). Every page response refreshes the locale cookie.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::json;
use std::time::SystemTime;

use super::error::{ServerError, ServerResult};
use super::middleware::request_locale;
use super::state::AppState;
use crate::locale::{split_locale_prefix, Locale, LOCALE_COOKIE};
use crate::pages::{articles, company, home, products, Page, PageOutcome};

static SERVER_START_TIME: Lazy<SystemTime> = Lazy::new(SystemTime::now);

/// One year, in seconds
const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

/// Liveness check; also reports whether the content store answers
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START_TIME.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    let store = match state.pages.resolver().store().ping().await {
        Ok(()) => "ready",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
        "components": {"store": store},
    }))
}

/// `GET /`: redirect to the negotiated locale
pub async fn root(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let locale = request_locale(&headers, &state.locales);
    Redirect::temporary(&format!("/{}", locale.code()))
}

/// Paths without a locale prefix are redirected; everything else is 404
pub async fn fallback(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") {
        return ServerError::NotFound.into_response();
    }

    match split_locale_prefix(path) {
        (Some(_), _) => ServerError::NotFound.into_response(),
        (None, rest) => redirect_to_locale(&state, &headers, rest),
    }
}

fn redirect_to_locale(state: &AppState, headers: &HeaderMap, rest: &str) -> Response {
    let locale = request_locale(headers, &state.locales);
    Redirect::temporary(&format!("/{}{}", locale.code(), rest)).into_response()
}

/// `GET /{segment}`: a locale's home page, or a one-segment path to redirect
pub async fn locale_root(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(segment): Path<String>,
) -> ServerResult<Response> {
    if segment.parse::<Locale>().is_err() {
        return Ok(redirect_to_locale(&state, &headers, &format!("/{}", segment)));
    }
    home_page(State(state), Path(segment)).await
}

pub async fn home_page(State(state): State<AppState>, Path(locale): Path<String>) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, home::home_page(&state.pages, locale).await?)
}

pub async fn product_list(State(state): State<AppState>, Path(locale): Path<String>) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, products::product_list_page(&state.pages, locale).await?)
}

pub async fn product_detail(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, products::product_page(&state.pages, &slug, locale).await?)
}

pub async fn article_list(State(state): State<AppState>, Path(locale): Path<String>) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, articles::article_list_page(&state.pages, locale).await?)
}

pub async fn article_detail(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, articles::article_page(&state.pages, &slug, locale).await?)
}

pub async fn company_page(State(state): State<AppState>, Path(locale): Path<String>) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, company::company_page(&state.pages, locale).await?)
}

pub async fn legal_page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ServerResult<Response> {
    let locale = state.route_locale(&locale)?;
    page_response(locale, company::legal_page(&state.pages, &slug, locale).await?)
}

/// `POST /api/contact`
pub async fn contact(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let locale = request_locale(&headers, &state.locales);
    let result = state.contact.submit_json(&body, locale).await;

    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result.body)).into_response()
}

fn page_response<T: Serialize>(locale: Locale, outcome: PageOutcome<Page<T>>) -> ServerResult<Response> {
    let page = outcome.found().ok_or(ServerError::NotFound)?;

    let mut response = Json(page).into_response();
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LOCALE_COOKIE,
        locale.code(),
        LOCALE_COOKIE_MAX_AGE
    );
    let cookie = HeaderValue::from_str(&cookie).map_err(|e| ServerError::Internal(e.to_string()))?;
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}
