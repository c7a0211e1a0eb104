use axum::extract::Request;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::time::Instant;

use crate::app_config::LocaleConfig;
use crate::locale::{negotiate, Locale};

/// Log method, path, status and duration of each request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}

/// Locale from the `locale` cookie, then `Accept-Language`, then the default
///
/// Negotiated locales that are not published fall back to the default.
pub fn request_locale(headers: &HeaderMap, locales: &LocaleConfig) -> Locale {
    let cookie = headers.get(COOKIE).and_then(|v| v.to_str().ok());
    let accept = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());

    let locale = negotiate(cookie, accept, locales.default);
    if locales.is_supported(locale) {
        locale
    } else {
        locales.default
    }
}
