/*!
 * HTTP surface.
 *
 * Routes:
 * - `GET /health`
 * - `GET /` redirects to the negotiated locale
 * - `GET /{locale}`, `/{locale}/home`, `/{locale}/products[/{slug}]`,
 *   `/{locale}/articles[/{slug}]`, `/{locale}/company`, `/{locale}/legal/{slug}`
 * - `POST /api/contact`
 */

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use log::info;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use crate::app_config::ServerConfig;

/// Largest accepted contact form body
const MAX_CONTACT_BODY_BYTES: usize = 64 * 1024;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/contact", post(routes::contact))
        .layer(DefaultBodyLimit::max(MAX_CONTACT_BODY_BYTES));

    let pages = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/{locale}", get(routes::locale_root))
        .route("/{locale}/home", get(routes::home_page))
        .route("/{locale}/products", get(routes::product_list))
        .route("/{locale}/products/{slug}", get(routes::product_detail))
        .route("/{locale}/articles", get(routes::article_list))
        .route("/{locale}/articles/{slug}", get(routes::article_detail))
        .route("/{locale}/company", get(routes::company_page))
        .route("/{locale}/legal/{slug}", get(routes::legal_page));

    Router::new()
        .merge(api)
        .merge(pages)
        .fallback(routes::fallback)
        .layer(from_fn(middleware::log_requests))
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on http://{}", address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
