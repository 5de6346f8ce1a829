//! Crawler and install metadata derived from the site configuration.

use crate::domain::model::Robots;
use crate::web::state::AppState;
use crate::web::templates::SitemapTemplate;
use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let robots = state.content().robots_data().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&robots),
    )
        .into_response()
}

pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let items = state.content().sitemap_data().await;
    match SitemapTemplate::new(&items).render() {
        Ok(body) => ([(header::CONTENT_TYPE, "application/xml")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Sitemap rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn manifest(State(state): State<AppState>) -> Response {
    let manifest = state.content().manifest_data().await;
    match serde_json::to_string(&manifest) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/manifest+json")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Manifest serialization failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub fn render_robots(robots: &Robots) -> String {
    let mut out = format!("User-Agent: {}\n", robots.rules.user_agent);
    if let Some(allow) = &robots.rules.allow {
        out.push_str(&format!("Allow: {}\n", allow));
    }
    if let Some(disallow) = &robots.rules.disallow {
        out.push_str(&format!("Disallow: {}\n", disallow));
    }
    if !robots.sitemap.is_empty() {
        out.push_str(&format!("\nSitemap: {}\n", robots.sitemap));
    }
    out
}
