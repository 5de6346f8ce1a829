use crate::web::handlers::{metadata, pages};
use crate::web::security::security_headers;
use crate::web::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// All site routes, `/static` served from `public_dir`.
pub fn create_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/career", get(pages::career))
        .route("/consulting", get(pages::consulting))
        .route("/contact", get(pages::contact))
        .route("/experience/{slug}", get(pages::experience))
        .route("/sitemap.xml", get(metadata::sitemap_xml))
        .route("/robots.txt", get(metadata::robots_txt))
        .route("/manifest.webmanifest", get(metadata::manifest))
        .route("/healthz", get(metadata::healthz))
        .nest_service("/static", ServeDir::new(public_dir.as_ref()))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(state.clone(), security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
